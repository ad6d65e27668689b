use std::time::Duration;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use crate::session::SessionManager;
use vitae_app_core::viewmodel::{resume_list_vm, ResumeListVm};
use vitae_app_core::AppState;
use vitae_client::ApiClient;
use vitae_core::{
    validate, AuthEnvelope, ExportFormat, LoginForm, ProfileForm, ResumeEnvelope, ResumeForm,
    ResumeRecord, SignupForm, UserProfile,
};

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(msg.to_string());
    pb
}

/// The user sees the fixed per-operation message; the server detail only
/// reaches the log.
fn require_auth_success(env: &AuthEnvelope, fallback: &'static str) -> Result<()> {
    if env.success {
        return Ok(());
    }
    error!("{fallback}: {:?}", env.error_text());
    bail!("{fallback}");
}

fn require_resume_success(env: &ResumeEnvelope, fallback: &'static str) -> Result<()> {
    if env.success {
        return Ok(());
    }
    error!("{fallback}: {:?}", env.error_text());
    bail!("{fallback}");
}

// --- Session / auth ---

pub async fn cmd_register(
    api: &ApiClient,
    sessions: &SessionManager,
    form: SignupForm,
) -> Result<UserProfile> {
    validate::validate_signup(&form)?;

    let pb = spinner("Registering...");
    let res = api.signup(&form).await;
    pb.finish_and_clear();

    let env = match res {
        Ok(env) => env,
        Err(e) => {
            error!("Registration failed: {e:#}");
            bail!("Registration failed");
        }
    };
    require_auth_success(&env, "Registration failed")?;

    let user = env
        .user_info
        .clone()
        .unwrap_or_else(|| UserProfile::new(form.name.clone(), form.email.clone()));
    api.set_token(env.token.clone());
    sessions.store(env.token, user.clone())?;

    println!(":: Registered and signed in as {} <{}>", user.name, user.email);
    Ok(user)
}

pub async fn cmd_login(
    api: &ApiClient,
    sessions: &SessionManager,
    email: String,
    password: String,
) -> Result<UserProfile> {
    let form = LoginForm { email, password };
    validate::validate_login(&form)?;

    let pb = spinner("Signing in...");
    let res = api.login(&form).await;
    pb.finish_and_clear();

    let env = match res {
        Ok(env) => env,
        Err(e) => {
            error!("Login failed: {e:#}");
            bail!("Login failed");
        }
    };
    require_auth_success(&env, "Login failed")?;

    let Some(user) = env.user_info.clone() else {
        error!("login succeeded without a user payload");
        bail!("Login failed");
    };
    api.set_token(env.token.clone());
    sessions.store(env.token, user.clone())?;

    println!(":: Signed in as {} <{}>", user.name, user.email);
    Ok(user)
}

pub async fn cmd_logout(api: &ApiClient, sessions: &SessionManager) -> Result<()> {
    // The server call may fail; the local sign-out happens regardless.
    match api.logout().await {
        Ok(env) if env.success => {}
        Ok(env) => warn!("logout rejected: {:?}", env.error_text()),
        Err(e) => warn!("logout call failed: {e:#}"),
    }
    api.set_token(None);
    sessions.clear()?;
    println!(":: Signed out");
    Ok(())
}

pub async fn cmd_whoami(api: &ApiClient) -> Result<UserProfile> {
    let pb = spinner("Checking session...");
    let res = api.me().await;
    pb.finish_and_clear();

    let env = match res {
        Ok(env) => env,
        Err(e) => {
            error!("Failed to fetch session: {e:#}");
            bail!("Failed to fetch session");
        }
    };
    require_auth_success(&env, "Failed to fetch session")?;
    let Some(user) = env.user_info else {
        bail!("Failed to fetch session");
    };

    println!(":: Signed in as {} <{}>", user.name, user.email);
    Ok(user)
}

pub async fn cmd_profile_setup(api: &ApiClient, form: ProfileForm) -> Result<UserProfile> {
    validate::validate_profile(&form)?;

    let pb = spinner("Saving profile...");
    let res = api.profile_create(&form).await;
    pb.finish_and_clear();

    let env = match res {
        Ok(env) => env,
        Err(e) => {
            error!("Failed to setup profile: {e:#}");
            bail!("Failed to setup profile");
        }
    };
    require_auth_success(&env, "Failed to setup profile")?;
    let user = env
        .user_info
        .unwrap_or_else(|| UserProfile::new(form.name.clone(), form.email.clone()));

    println!(":: Profile updated for {}", user.name);
    Ok(user)
}

pub async fn cmd_profile_show(api: &ApiClient) -> Result<UserProfile> {
    let pb = spinner("Fetching profile...");
    let res = api.profile_get().await;
    pb.finish_and_clear();

    let env = match res {
        Ok(env) => env,
        Err(e) => {
            error!("Failed to fetch profile: {e:#}");
            bail!("Failed to fetch profile");
        }
    };
    require_auth_success(&env, "Failed to fetch profile")?;
    let Some(user) = env.user_info else {
        bail!("Failed to fetch profile");
    };

    println!(":: Profile");
    println!("   Name:  {}", user.name);
    println!("   Email: {}", user.email);
    if let Some(role) = &user.role {
        println!("   Role:  {role}");
    }
    if let Some(bio) = &user.bio {
        println!("   Bio:   {bio}");
    }
    if let Some(phone) = &user.phone {
        println!("   Phone: {phone}");
    }
    if let Some(address) = &user.address {
        println!("   Addr:  {address}");
    }
    if let Some(linkedin) = &user.linkedin {
        println!("   In:    {linkedin}");
    }
    if let Some(github) = &user.github {
        println!("   GH:    {github}");
    }
    Ok(user)
}

// --- Resume resource ---

pub async fn cmd_resume_create(api: &ApiClient, form: ResumeForm) -> Result<Option<ResumeRecord>> {
    validate::validate_resume(&form)?;

    let pb = spinner("Generating resume...");
    let res = api.resume_create(&form).await;
    pb.finish_and_clear();

    let env = match res {
        Ok(env) => env,
        Err(e) => {
            error!("Error occurred while creating the resume: {e:#}");
            bail!("Error occurred while creating the resume");
        }
    };
    require_resume_success(&env, "Error occurred while creating the resume")?;

    let record = env.resume_info.and_then(|p| p.into_one());
    match &record {
        Some(r) => println!(":: Resume created: {} ({})", r.title, r.id),
        None => println!(":: Resume created"),
    }
    println!("   Run `vitae-cli resume list` to see the full collection.");
    Ok(record)
}

pub async fn cmd_resume_list(api: &ApiClient, search: Option<String>) -> Result<ResumeListVm> {
    let pb = spinner("Fetching resumes...");
    let res = api.resume_list().await;
    pb.finish_and_clear();

    let env = match res {
        Ok(env) => env,
        Err(e) => {
            error!("Failed to fetch resumes: {e:#}");
            bail!("Failed to fetch resumes");
        }
    };
    require_resume_success(&env, "Failed to fetch resumes")?;

    let mut state = AppState::default();
    state.resumes.items = env.resume_info.map(|p| p.into_vec()).unwrap_or_default();
    let vm = resume_list_vm(&state, search.as_deref());

    if vm.rows.is_empty() {
        if vm.total == 0 {
            println!(":: No resumes yet.");
        } else {
            println!(":: No resumes match the search ({} total).", vm.total);
        }
        return Ok(vm);
    }

    println!(":: Resumes ({} of {})", vm.rows.len(), vm.total);
    for row in &vm.rows {
        println!(
            "   {:<10} {:<28} {:<20} {}",
            row.id, row.title, row.owner, row.created_human
        );
    }
    Ok(vm)
}

pub async fn cmd_resume_show(api: &ApiClient, id: String) -> Result<ResumeRecord> {
    let pb = spinner("Fetching resume...");
    let res = api.resume_get(&id).await;
    pb.finish_and_clear();

    let env = match res {
        Ok(env) => env,
        Err(e) => {
            error!("Failed to fetch the resume: {e:#}");
            bail!("Failed to fetch the resume");
        }
    };
    require_resume_success(&env, "Failed to fetch the resume")?;
    let Some(record) = env.resume_info.and_then(|p| p.into_one()) else {
        bail!("Failed to fetch the resume");
    };

    println!(":: {} — {} <{}>", record.title, record.name, record.email);
    if let Some(summary) = &record.professional_summary {
        println!("\nSummary\n{summary}");
    }
    if let Some(skills) = &record.skills {
        println!("\nSkills\n{skills}");
    }
    if let Some(work) = &record.work_experience {
        println!("\nExperience\n{work}");
    }
    if let Some(projects) = &record.projects {
        println!("\nProjects\n{projects}");
    }
    if let Some(education) = &record.education {
        println!("\nEducation\n{education}");
    }
    if let Some(certs) = &record.certifications {
        println!("\nCertifications\n{certs}");
    }
    if let Some(text) = &record.resume_text {
        println!("\n{text}");
    }
    Ok(record)
}

pub async fn cmd_resume_delete(api: &ApiClient, id: String) -> Result<()> {
    let pb = spinner("Deleting resume...");
    let res = api.resume_delete(&id).await;
    pb.finish_and_clear();

    let env = match res {
        Ok(env) => env,
        Err(e) => {
            error!("An error occurred deleting the document: {e:#}");
            bail!("An error occurred deleting the document");
        }
    };
    // The delete response is authoritative; the list refresh below is
    // reconciliation, not the removal mechanism.
    require_resume_success(&env, "An error occurred deleting the document")?;
    println!(":: Deleted {id}");

    tokio::time::sleep(Duration::from_millis(vitae_config::DELETE_RECONCILE_DELAY_MS)).await;
    match api.resume_list().await {
        Ok(env) if env.success => {
            let remaining = env.resume_info.map(|p| p.into_vec()).unwrap_or_default();
            println!(":: {} resumes remaining", remaining.len());
        }
        Ok(env) => warn!("post-delete reconciliation rejected: {:?}", env.error_text()),
        Err(e) => warn!("post-delete reconciliation failed: {e:#}"),
    }
    Ok(())
}

pub async fn cmd_resume_export(
    api: &ApiClient,
    id: String,
    format: ExportFormat,
) -> Result<String> {
    let fallback = match format {
        ExportFormat::Pdf => "An error occurred generating the PDF",
        ExportFormat::Word => "An error occurred generating the Word document",
    };

    let pb = spinner(&format!("Requesting {} export...", format.label()));
    let res = match format {
        ExportFormat::Pdf => api.export_pdf(&id).await,
        ExportFormat::Word => api.export_word(&id).await,
    };
    pb.finish_and_clear();

    let link = match res {
        Ok(link) => link,
        Err(e) => {
            error!("{fallback}: {e:#}");
            bail!("{fallback}");
        }
    };

    println!(":: {} ready: {}", format.label(), link.url);
    Ok(link.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_envelope_failures_map_to_the_fixed_message() {
        let env = AuthEnvelope {
            success: false,
            error: Some(serde_json::Value::String("pg: unique violation".into())),
            ..Default::default()
        };
        let err = require_auth_success(&env, "Registration failed").unwrap_err();
        // The server detail stays out of the user-facing string.
        assert_eq!(err.to_string(), "Registration failed");
    }
}
