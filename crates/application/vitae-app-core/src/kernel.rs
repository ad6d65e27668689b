use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::app_core::{AppCommand, AppStore, DomainEvent};
use crate::domain::{AuthAction, ExportReadout, StoredSession};
use crate::ports::{ResumeServicePort, SessionCachePort};
use vitae_core::validate;
use vitae_core::{AuthEnvelope, ExportFormat, ResumeEnvelope};

static RUNTIME: OnceLock<std::result::Result<tokio::runtime::Runtime, String>> = OnceLock::new();

fn runtime() -> anyhow::Result<&'static tokio::runtime::Runtime> {
    match RUNTIME.get_or_init(|| tokio::runtime::Runtime::new().map_err(|e| e.to_string())) {
        Ok(rt) => Ok(rt),
        Err(message) => Err(anyhow::anyhow!(message.clone())),
    }
}

fn msg_or(message: String, default: &str) -> String {
    if message.trim().is_empty() {
        default.to_string()
    } else {
        message
    }
}

/// Drives the state tree: commands are validated here, network work runs
/// on background workers, and completions come back as `DomainEvent`s
/// through the channel drained by [`AppKernel::tick`].
///
/// There is deliberately no cancellation and no dedup of concurrent
/// dispatches: a late response still lands in shared state, and the last
/// response to *resolve* wins.
pub struct AppKernel<A, C> {
    pub store: AppStore,
    api: Arc<A>,
    cache: Arc<C>,

    tx: mpsc::Sender<DomainEvent>,
    rx: mpsc::Receiver<DomainEvent>,
}

impl<A, C> AppKernel<A, C>
where
    A: ResumeServicePort,
    C: SessionCachePort,
{
    pub fn new(store: AppStore, api: A, cache: C) -> Self {
        let (tx, rx) = mpsc::channel(vitae_config::EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            api: Arc::new(api),
            cache: Arc::new(cache),
            tx,
            rx,
        }
    }

    pub fn dispatch(&mut self, cmd: AppCommand) {
        match cmd {
            AppCommand::Boot => self.boot(),

            AppCommand::Navigate(r) => self.store.apply(DomainEvent::RouteChanged(r)),

            AppCommand::Register(form) => {
                if let Err(e) = validate::validate_signup(&form) {
                    self.store.apply(DomainEvent::AuthFailed {
                        action: AuthAction::Register,
                        message: e.to_string(),
                    });
                    return;
                }
                self.auth_action(
                    "vitae-register",
                    AuthAction::Register,
                    "Registration failed",
                    "Registration successful",
                    true,
                    move |api| async move { api.signup(&form).await },
                );
            }

            AppCommand::Login(form) => {
                if let Err(e) = validate::validate_login(&form) {
                    self.store.apply(DomainEvent::AuthFailed {
                        action: AuthAction::Login,
                        message: e.to_string(),
                    });
                    return;
                }
                self.auth_action(
                    "vitae-login",
                    AuthAction::Login,
                    "Login failed",
                    "Login successful",
                    true,
                    move |api| async move { api.login(&form).await },
                );
            }

            AppCommand::Logout => self.logout(),

            AppCommand::SetupProfile(form) => {
                if let Err(e) = validate::validate_profile(&form) {
                    self.store.apply(DomainEvent::AuthFailed {
                        action: AuthAction::Profile,
                        message: e.to_string(),
                    });
                    return;
                }
                self.auth_action(
                    "vitae-profile-setup",
                    AuthAction::Profile,
                    "Failed to setup profile",
                    "Profile updated successfully",
                    false,
                    move |api| async move { api.profile_create(&form).await },
                );
            }

            AppCommand::FetchProfile => {
                self.auth_action(
                    "vitae-profile-fetch",
                    AuthAction::Profile,
                    "Failed to fetch profile",
                    "",
                    false,
                    move |api| async move { api.profile_get().await },
                );
            }

            AppCommand::CreateResume(form) => {
                if let Err(e) = validate::validate_resume(&form) {
                    self.store.apply(DomainEvent::ResumeFailed {
                        message: e.to_string(),
                    });
                    return;
                }
                self.resume_action(
                    "vitae-resume-create",
                    "Error occurred while creating the resume",
                    move |api| async move { api.resume_create(&form).await },
                    |env| DomainEvent::ResumeCreated {
                        record: env.resume_info.and_then(|p| p.into_one()),
                        message: msg_or(env.message, "Resume created successfully"),
                    },
                );
            }

            AppCommand::ListResumes => {
                self.resume_action(
                    "vitae-resume-list",
                    "Failed to fetch resumes",
                    move |api| async move { api.resume_list().await },
                    |env| DomainEvent::ResumeListLoaded {
                        items: env.resume_info.map(|p| p.into_vec()).unwrap_or_default(),
                        message: msg_or(env.message, "All resumes fetched"),
                    },
                );
            }

            AppCommand::FetchResume(id) => {
                self.resume_action(
                    "vitae-resume-fetch",
                    "Failed to fetch the resume",
                    move |api| async move { api.resume_get(&id).await },
                    |env| DomainEvent::ResumeFetched {
                        record: env.resume_info.and_then(|p| p.into_one()),
                        message: msg_or(env.message, "Resume fetched"),
                    },
                );
            }

            AppCommand::DeleteResume(id) => self.delete_resume(id),

            AppCommand::ExportResume(id, format) => self.export_resume(id, format),

            AppCommand::ClearError => self.store.apply(DomainEvent::ErrorCleared),
            AppCommand::ClearSuccess => self.store.apply(DomainEvent::SuccessCleared),
        }
    }

    /// Call this from the UI loop to fold completed work into the state.
    pub fn tick(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            self.store.apply(ev);
        }
    }

    pub fn sender(&self) -> mpsc::Sender<DomainEvent> {
        self.tx.clone()
    }

    // --- Boot / session restoration ---

    fn boot(&mut self) {
        let echo = match self.cache.load() {
            Ok(v) => v,
            Err(e) => {
                warn!("failed to read session echo: {e:#}");
                None
            }
        };

        let Some(echo) = echo else {
            self.store.apply(DomainEvent::BootFinished);
            return;
        };

        self.api.adopt_token(echo.token.clone());
        self.store
            .apply(DomainEvent::SessionRestored { user: echo.user });

        self.spawn_worker(
            "vitae-restore-session",
            DomainEvent::BootFinished,
            move |api, cache, tx| async move {
                let verified = match api.session().await {
                    Ok(env) if env.success => env.user_info,
                    Ok(env) => {
                        error!("session reconcile rejected: {:?}", env.error_text());
                        None
                    }
                    Err(e) => {
                        error!("session reconcile failed: {e:#}");
                        None
                    }
                };

                match verified {
                    Some(user) => {
                        let _ = tx.send(DomainEvent::SessionVerified { user }).await;
                    }
                    None => {
                        api.adopt_token(None);
                        if let Err(e) = cache.clear() {
                            warn!("failed to clear session echo: {e:#}");
                        }
                        let _ = tx.send(DomainEvent::SessionInvalid).await;
                    }
                }
                let _ = tx.send(DomainEvent::BootFinished).await;
            },
        );
    }

    // --- Auth ---

    fn logout(&mut self) {
        self.store.apply(DomainEvent::AuthStarted(AuthAction::Logout));
        let fail = DomainEvent::AuthFailed {
            action: AuthAction::Logout,
            message: "Logout failed".into(),
        };
        self.spawn_worker("vitae-logout", fail, move |api, cache, tx| async move {
            let res = api.logout().await;

            // Sign out locally no matter what the server said.
            api.adopt_token(None);
            if let Err(e) = cache.clear() {
                warn!("failed to clear session echo: {e:#}");
            }

            let ev = match res {
                Ok(env) if env.success => DomainEvent::AuthSucceeded {
                    action: AuthAction::Logout,
                    user: None,
                    message: msg_or(env.message, "Logout successful"),
                },
                Ok(env) => {
                    error!("logout rejected: {:?}", env.error_text());
                    DomainEvent::AuthFailed {
                        action: AuthAction::Logout,
                        message: "Logout failed".into(),
                    }
                }
                Err(e) => {
                    error!("logout failed: {e:#}");
                    DomainEvent::AuthFailed {
                        action: AuthAction::Logout,
                        message: "Logout failed".into(),
                    }
                }
            };
            let _ = tx.send(ev).await;
        });
    }

    /// One generic two-phase auth action: loading on dispatch, then a
    /// succeeded/failed transition mapped from the response envelope.
    fn auth_action<F, Fut>(
        &mut self,
        thread_name: &'static str,
        action: AuthAction,
        fallback: &'static str,
        success_default: &'static str,
        persist_echo: bool,
        call: F,
    ) where
        F: FnOnce(Arc<A>) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<AuthEnvelope>> + 'static,
    {
        self.store.apply(DomainEvent::AuthStarted(action));
        let fail = DomainEvent::AuthFailed {
            action,
            message: fallback.into(),
        };
        self.spawn_worker(thread_name, fail, move |api, cache, tx| async move {
            let ev = match call(api.clone()).await {
                Ok(env) if env.success => {
                    if persist_echo {
                        if let Some(user) = &env.user_info {
                            api.adopt_token(env.token.clone());
                            let echo = StoredSession {
                                token: env.token.clone(),
                                user: user.clone(),
                            };
                            if let Err(e) = cache.save(&echo) {
                                warn!("failed to persist session echo: {e:#}");
                            }
                        }
                    }
                    DomainEvent::AuthSucceeded {
                        action,
                        user: env.user_info,
                        message: msg_or(env.message, success_default),
                    }
                }
                Ok(env) => {
                    error!("{fallback}: {:?}", env.error_text());
                    DomainEvent::AuthFailed {
                        action,
                        message: fallback.into(),
                    }
                }
                Err(e) => {
                    error!("{fallback}: {e:#}");
                    DomainEvent::AuthFailed {
                        action,
                        message: fallback.into(),
                    }
                }
            };
            let _ = tx.send(ev).await;
        });
    }

    // --- Resume resource ---

    /// One generic resume-resource action, parameterized by endpoint call
    /// and response-shape mapper.
    fn resume_action<F, Fut, M>(
        &mut self,
        thread_name: &'static str,
        fallback: &'static str,
        call: F,
        map: M,
    ) where
        F: FnOnce(Arc<A>) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<ResumeEnvelope>> + 'static,
        M: FnOnce(ResumeEnvelope) -> DomainEvent + Send + 'static,
    {
        self.store.apply(DomainEvent::ResumeRequestStarted);
        let fail = DomainEvent::ResumeFailed {
            message: fallback.into(),
        };
        self.spawn_worker(thread_name, fail, move |api, _cache, tx| async move {
            let ev = match call(api).await {
                Ok(env) if env.success => map(env),
                Ok(env) => {
                    error!("{fallback}: {:?}", env.error_text());
                    DomainEvent::ResumeFailed {
                        message: fallback.into(),
                    }
                }
                Err(e) => {
                    error!("{fallback}: {e:#}");
                    DomainEvent::ResumeFailed {
                        message: fallback.into(),
                    }
                }
            };
            let _ = tx.send(ev).await;
        });
    }

    fn delete_resume(&mut self, id: vitae_core::ResumeId) {
        self.store.apply(DomainEvent::ResumeRequestStarted);
        let fail = DomainEvent::ResumeFailed {
            message: "An error occurred deleting the document".into(),
        };
        self.spawn_worker(
            "vitae-resume-delete",
            fail,
            move |api, _cache, tx| async move {
                match api.resume_delete(&id).await {
                    Ok(env) if env.success => {
                        // The delete response is authoritative: remove the
                        // record now, reconcile against the server later.
                        let _ = tx
                            .send(DomainEvent::ResumeDeleted {
                                id: id.clone(),
                                message: msg_or(env.message, "Document deleted successfully"),
                            })
                            .await;

                        tokio::time::sleep(Duration::from_millis(
                            vitae_config::DELETE_RECONCILE_DELAY_MS,
                        ))
                        .await;

                        match api.resume_list().await {
                            Ok(env) if env.success => {
                                let _ = tx
                                    .send(DomainEvent::ResumeListLoaded {
                                        items: env
                                            .resume_info
                                            .map(|p| p.into_vec())
                                            .unwrap_or_default(),
                                        message: msg_or(env.message, "All resumes fetched"),
                                    })
                                    .await;
                            }
                            Ok(env) => {
                                warn!(
                                    "post-delete reconciliation rejected: {:?}",
                                    env.error_text()
                                );
                            }
                            Err(e) => warn!("post-delete reconciliation failed: {e:#}"),
                        }
                    }
                    Ok(env) => {
                        error!("delete rejected: {:?}", env.error_text());
                        let _ = tx
                            .send(DomainEvent::ResumeFailed {
                                message: "An error occurred deleting the document".into(),
                            })
                            .await;
                    }
                    Err(e) => {
                        error!("delete failed: {e:#}");
                        let _ = tx
                            .send(DomainEvent::ResumeFailed {
                                message: "An error occurred deleting the document".into(),
                            })
                            .await;
                    }
                }
            },
        );
    }

    fn export_resume(&mut self, id: vitae_core::ResumeId, format: ExportFormat) {
        self.store.apply(DomainEvent::ResumeRequestStarted);
        let fallback = match format {
            ExportFormat::Pdf => "An error occurred generating the PDF",
            ExportFormat::Word => "An error occurred generating the Word document",
        };
        let fail = DomainEvent::ResumeFailed {
            message: fallback.into(),
        };
        self.spawn_worker(
            "vitae-resume-export",
            fail,
            move |api, _cache, tx| async move {
                let ev = match api.export(&id, format).await {
                    Ok(link) => DomainEvent::ExportReady {
                        readout: ExportReadout {
                            resume_id: id,
                            format,
                            link,
                        },
                        message: format!("{} link ready", format.label()),
                    },
                    Err(e) => {
                        error!("{fallback}: {e:#}");
                        DomainEvent::ResumeFailed {
                            message: fallback.into(),
                        }
                    }
                };
                let _ = tx.send(ev).await;
            },
        );
    }

    // --- Worker plumbing ---

    fn spawn_worker<F, Fut>(&mut self, thread_name: &'static str, fail_event: DomainEvent, job: F)
    where
        F: FnOnce(Arc<A>, Arc<C>, mpsc::Sender<DomainEvent>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let api = self.api.clone();
        let cache = self.cache.clone();
        let tx = self.tx.clone();
        let thread_fail = fail_event.clone();

        let spawn_res = std::thread::Builder::new()
            .name(thread_name.into())
            .spawn(move || {
                let rt = match runtime() {
                    Ok(rt) => rt,
                    Err(e) => {
                        error!("failed to start async runtime: {e:#}");
                        let _ = tx.blocking_send(thread_fail);
                        return;
                    }
                };
                rt.block_on(job(api, cache, tx));
            });

        if let Err(e) = spawn_res {
            error!("failed to spawn {thread_name} worker thread: {e}");
            self.store.apply(fail_event);
        }
    }
}
