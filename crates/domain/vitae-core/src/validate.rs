use thiserror::Error;

use crate::profile::{LoginForm, ProfileForm, SignupForm};
use crate::resume::ResumeForm;

/// Client-side validation failure. Surfaced to the user verbatim and
/// short-circuits before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0}")]
    Missing(&'static str),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

fn require(value: &str, message: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Missing(message));
    }
    Ok(())
}

pub fn validate_signup(form: &SignupForm) -> Result<(), FormError> {
    require(&form.name, "Name is required")?;
    require(&form.email, "Email is required")?;
    require(&form.password, "Password is required")?;
    if form.password != form.confirm_password {
        return Err(FormError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_login(form: &LoginForm) -> Result<(), FormError> {
    require(&form.email, "Email is required")?;
    require(&form.password, "Password is required")?;
    Ok(())
}

pub fn validate_profile(form: &ProfileForm) -> Result<(), FormError> {
    require(&form.name, "Name is required")?;
    require(&form.email, "Email is required")?;
    Ok(())
}

pub fn validate_resume(form: &ResumeForm) -> Result<(), FormError> {
    require(&form.title, "Resume title is required")?;
    require(&form.education, "Education information is required")?;
    require(&form.work_experience, "Work experience is required")?;
    require(&form.skills, "Skills are required")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup() -> SignupForm {
        SignupForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "hunter2!".into(),
            confirm_password: "hunter2!".into(),
        }
    }

    #[test]
    fn signup_accepts_complete_form() {
        assert_eq!(validate_signup(&signup()), Ok(()));
    }

    #[test]
    fn signup_rejects_password_mismatch() {
        let mut form = signup();
        form.confirm_password = "different".into();
        assert_eq!(validate_signup(&form), Err(FormError::PasswordMismatch));
    }

    #[test]
    fn signup_rejects_blank_required_fields() {
        let mut form = signup();
        form.email = "  ".into();
        assert_eq!(
            validate_signup(&form),
            Err(FormError::Missing("Email is required"))
        );
    }

    #[test]
    fn resume_reports_first_missing_field_in_form_order() {
        let form = ResumeForm {
            title: "Backend Engineer".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            skills: String::new(),
            work_experience: String::new(),
            education: String::new(),
            ..Default::default()
        };
        assert_eq!(
            validate_resume(&form),
            Err(FormError::Missing("Education information is required"))
        );
    }
}
