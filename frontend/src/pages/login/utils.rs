use crate::api::{ApiError, LoginRequest, RegisterRequest};
use leptos::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

#[derive(Clone, Copy)]
pub struct AuthFormState {
    pub name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl Default for AuthFormState {
    fn default() -> Self {
        Self {
            name: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
        }
    }
}

impl AuthFormState {
    pub fn login_request(&self) -> Result<LoginRequest, ApiError> {
        validate_login(&self.email.get_untracked(), &self.password.get_untracked())
    }

    pub fn register_request(&self) -> Result<RegisterRequest, ApiError> {
        validate_register(
            &self.name.get_untracked(),
            &self.email.get_untracked(),
            &self.password.get_untracked(),
        )
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, ApiError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn validate_register(
    name: &str,
    email: &str,
    password: &str,
) -> Result<RegisterRequest, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    let login = validate_login(email, password)?;
    if !login.email.contains('@') {
        return Err(ApiError::validation("Email address is invalid"));
    }
    Ok(RegisterRequest {
        email: login.email,
        password: login.password,
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_email_and_password() {
        assert_eq!(validate_login("  ", "pw").unwrap_err().code, "VALIDATION_ERROR");
        assert_eq!(
            validate_login("ops@fleet.example", "").unwrap_err().error,
            "Password is required"
        );
        let request = validate_login(" ops@fleet.example ", "pw").unwrap();
        assert_eq!(request.email, "ops@fleet.example");
    }

    #[test]
    fn register_requires_name_and_plausible_email() {
        assert_eq!(
            validate_register("", "a@b.c", "pw").unwrap_err().error,
            "Name is required"
        );
        assert_eq!(
            validate_register("Ops", "not-an-email", "pw").unwrap_err().error,
            "Email address is invalid"
        );
        let request = validate_register(" Ops ", "a@b.c", "pw").unwrap();
        assert_eq!(request.name, "Ops");
    }
}
