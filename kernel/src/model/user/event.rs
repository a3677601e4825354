use crate::model::validation::{char_len, is_blank, is_valid_email, MAX_EMAIL_LEN};
use derive_new::new;
use shared::error::{AppError, AppResult};

const MAX_NAME_LEN: usize = 100;
const MAX_DNI_LEN: usize = 10;
const MAX_PHONE_LEN: usize = 20;

#[derive(Debug, Clone, new)]
pub struct CreateUser {
    pub name: String,
    pub dni: String,
    pub email: String,
    pub phone: Option<String>,
}

impl CreateUser {
    // テーブルの列幅に収まるかまでを見る。DNI の検証桁は確認しない
    pub fn validate(&self) -> AppResult<()> {
        let fail = |message: &str| Err(AppError::ValidationError(message.into()));

        if is_blank(&self.name) {
            return fail("El nombre del usuario es requerido");
        }
        if char_len(&self.name) > MAX_NAME_LEN {
            return fail("El nombre del usuario no puede tener más de 100 caracteres");
        }
        if is_blank(&self.dni) {
            return fail("El DNI del usuario es requerido");
        }
        if char_len(&self.dni) > MAX_DNI_LEN {
            return fail("El DNI no puede tener más de 10 caracteres");
        }
        if is_blank(&self.email) {
            return fail("El email del usuario es requerido");
        }
        if !is_valid_email(&self.email) {
            return fail("El formato del email es inválido");
        }
        if char_len(&self.email) > MAX_EMAIL_LEN {
            return fail("El email no puede tener más de 100 caracteres");
        }
        if self
            .phone
            .as_deref()
            .is_some_and(|phone| char_len(phone) > MAX_PHONE_LEN)
        {
            return fail("El teléfono no puede tener más de 20 caracteres");
        }
        Ok(())
    }
}
