const DNI_LEN: usize = 10;
const MAX_PROVINCE_CODE: u32 = 24;
// 国外在住者向けの特別コード
const SPECIAL_PROVINCE_CODE: u32 = 30;

// 10桁の数字で県コードが有効かつ検証桁が一致すれば true
// 24 を超える県コードは 30 のときだけ許可する
pub fn is_valid_ecuadorian_dni(dni: &str) -> bool {
    if dni.len() != DNI_LEN || !dni.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u32> = dni.bytes().map(|b| u32::from(b - b'0')).collect();

    let province = digits[0] * 10 + digits[1];
    if province < 1 || (province > MAX_PROVINCE_CODE && province != SPECIAL_PROVINCE_CODE) {
        return false;
    }

    check_digit(&digits[..DNI_LEN - 1]) == digits[DNI_LEN - 1]
}

fn check_digit(digits: &[u32]) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(position, &digit)| {
            if position % 2 == 0 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    match sum % 10 {
        0 => 0,
        rest => 10 - rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2222222222")]
    #[case("0102030400")]
    #[case("1234567897")]
    #[case("3000000004")]
    fn accepts_valid_numbers(#[case] dni: &str) {
        assert!(is_valid_ecuadorian_dni(dni));
    }

    #[rstest]
    #[case::bad_check_digit("1234567890")]
    #[case::province_zero("0000000000")]
    #[case::province_above_range("2500000000")]
    #[case::too_short("123456789")]
    #[case::too_long("12345678977")]
    #[case::letters("12345678a7")]
    #[case::empty("")]
    #[case::non_ascii_digits("١٢٣٤٥٦٧٨٩٧")]
    fn rejects_invalid_numbers(#[case] dni: &str) {
        assert!(!is_valid_ecuadorian_dni(dni));
    }

    #[test]
    fn mutating_the_check_digit_invalidates() {
        let valid = "0102030400";
        for digit in 1..=9 {
            let mutated = format!("{}{}", &valid[..9], digit);
            assert!(!is_valid_ecuadorian_dni(&mutated), "{mutated}");
        }
    }
}
