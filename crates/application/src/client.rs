//! Festival records client
//!
//! [`FestivalClient`] is the single entry point for callers. Each
//! operation either answers from canned data (demo mode) or walks the
//! live API through the candidate tables in [`crate::endpoints`].

use std::num::NonZeroUsize;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

use sambharalu_domain::{
    AccessGrant, ApiResponse, Attachment, CHUNK_SIZE, Category, CreatedRecord, DomainError,
    OtpDispatch, RecordDraft, RecordSummary, Session, SignupForm, SignupVerified, UploadChunk,
    UploadReport, UserProfile, auth::extract_access_token,
    request::{ApiRequest, RequestBody},
};

use crate::config::{ClientConfig, DemoSettings};
use crate::demo;
use crate::endpoints::{self, Operation};
use crate::error::{ClientError, ClientResult};
use crate::ports::{Clock, HttpClient};
use crate::candidates::{accepted_object, ok_list, ok_object, try_candidates};
use crate::transport::Transport;

/// Client for the festival records API.
///
/// Owns its session; every call that changes the token takes `&mut self`.
pub struct FestivalClient {
    session: Session,
    transport: Transport,
    demo: DemoSettings,
    clock: Arc<dyn Clock>,
}

impl FestivalClient {
    /// Creates a client from an explicit configuration.
    ///
    /// The session starts with `config.token`, if any.
    #[must_use]
    pub fn new(config: ClientConfig, http: Arc<dyn HttpClient>, clock: Arc<dyn Clock>) -> Self {
        let session = Session::new(&config.base_url, config.demo_mode, config.token);
        Self {
            session,
            transport: Transport::new(http, config.timeout),
            demo: config.demo,
            clock,
        }
    }

    /// Returns the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns true when every operation is served from canned data.
    #[must_use]
    pub const fn is_demo(&self) -> bool {
        self.session.is_demo()
    }

    /// Replaces the bearer token.
    pub fn set_auth_token(&mut self, token: impl Into<String>) {
        self.session.set_token(token);
    }

    /// Sets the token, then checks it by fetching the current user.
    pub async fn set_token_and_verify(&mut self, token: impl Into<String>) -> bool {
        self.set_auth_token(token);
        self.read_current_user().await.is_some()
    }

    async fn run<T, F>(
        &self,
        operation: &Operation,
        values: &Map<String, Value>,
        extract: F,
    ) -> ClientResult<T>
    where
        F: Fn(&ApiResponse) -> Option<T>,
    {
        try_candidates(&self.transport, &self.session, operation, values, extract).await
    }

    /// Logs in with a phone number, username or email and a password.
    ///
    /// On success the token is stored in the session. Demo mode accepts any
    /// identifier with the demo password and returns `Ok(None)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] when the server refuses the
    /// credentials, or another fallback error when no login endpoint answers.
    pub async fn login(
        &mut self,
        identifier: &str,
        password: &str,
    ) -> ClientResult<Option<AccessGrant>> {
        let identifier = identifier.trim();

        if self.is_demo() {
            let grant = demo::login(identifier, password);
            if let Some(grant) = &grant {
                self.session.set_token(grant.access_token.clone());
            }
            return Ok(grant);
        }

        let mut values = Map::new();
        values.insert("identifier".into(), Value::String(identifier.to_string()));
        values.insert("password".into(), Value::String(password.to_string()));

        let grant = self
            .run(&endpoints::LOGIN, &values, |response| {
                accepted_object(response).and_then(|body| AccessGrant::from_body(&body))
            })
            .await?;

        info!("logged in");
        self.session.set_token(grant.access_token.clone());
        Ok(Some(grant))
    }

    /// Fetches the profile of the token holder.
    ///
    /// Returns `None` when no endpoint produced a profile; failures are
    /// logged, not returned.
    pub async fn read_current_user(&self) -> Option<UserProfile> {
        if self.is_demo() {
            if self.demo.profile_requires_token && !self.session.is_authenticated() {
                return None;
            }
            return Some(demo::current_user());
        }

        match self.run(&endpoints::CURRENT_USER, &Map::new(), ok_object).await {
            Ok(fields) => Some(UserProfile::new(fields)),
            Err(error) => {
                debug!(%error, "no current user");
                None
            }
        }
    }

    /// Asks the server to text a signup OTP to `phone`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for a blank phone number, or a
    /// fallback error when no OTP endpoint accepts the request.
    pub async fn send_signup_otp(&self, phone: &str) -> ClientResult<OtpDispatch> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(DomainError::MissingField("Phone number").into());
        }

        if self.is_demo() {
            return Ok(demo::otp_dispatch(phone, &self.demo.otp_code));
        }

        let mut values = Map::new();
        values.insert("phone".into(), Value::String(phone.to_string()));

        let body = self.run(&endpoints::SEND_OTP, &values, accepted_object).await?;
        info!("signup OTP sent");
        Ok(OtpDispatch {
            phone: phone.to_string(),
            body,
        })
    }

    /// Verifies the OTP and creates the account.
    ///
    /// A token in the answer is stored in the session. Demo mode returns
    /// `Ok(None)` for a wrong code.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] when the form does not
    /// validate, or a fallback error when verification fails.
    pub async fn verify_signup_otp(
        &mut self,
        form: &SignupForm,
    ) -> ClientResult<Option<SignupVerified>> {
        form.validate()?;

        let verified = if self.is_demo() {
            demo::verify(form, &self.demo.otp_code)
        } else {
            let body = self
                .run(&endpoints::VERIFY_OTP, &form.to_values(), accepted_object)
                .await?;
            Some(SignupVerified {
                access_token: extract_access_token(&body),
                body,
            })
        };

        if let Some(token) = verified.as_ref().and_then(|v| v.access_token.clone()) {
            self.session.set_token(token);
        }
        Ok(verified)
    }

    /// Lists record categories.
    ///
    /// Entries without a usable `id` and `name` are skipped.
    ///
    /// # Errors
    ///
    /// Returns a fallback error when no category endpoint returns a list.
    pub async fn get_categories(&self) -> ClientResult<Vec<Category>> {
        if self.is_demo() {
            return Ok(demo::categories());
        }

        let items = self.run(&endpoints::CATEGORIES, &Map::new(), ok_list).await?;
        Ok(items.iter().filter_map(Category::from_value).collect())
    }

    /// Lists records.
    ///
    /// # Errors
    ///
    /// Returns a fallback error when no record endpoint returns a list.
    pub async fn get_records(&self) -> ClientResult<Vec<RecordSummary>> {
        if self.is_demo() {
            return Ok(demo::records());
        }

        let items = self.run(&endpoints::RECORDS, &Map::new(), ok_list).await?;
        Ok(summaries(&items))
    }

    /// Searches records by title and description.
    ///
    /// A blank query lists everything.
    ///
    /// # Errors
    ///
    /// Returns a fallback error when no search endpoint returns a list.
    pub async fn search_records(&self, query: &str) -> ClientResult<Vec<RecordSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return self.get_records().await;
        }

        if self.is_demo() {
            return Ok(demo::search(query));
        }

        let mut values = Map::new();
        values.insert("query".into(), Value::String(query.to_string()));

        let items = self.run(&endpoints::SEARCH_RECORDS, &values, ok_list).await?;
        Ok(summaries(&items))
    }

    /// Submits a new record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for a blank title or
    /// description, or a fallback error when no endpoint accepts the record.
    pub async fn create_record(&self, draft: RecordDraft) -> ClientResult<CreatedRecord> {
        let draft = draft.normalized()?;

        if self.is_demo() {
            return Ok(demo::created_record(&draft, self.clock.now()));
        }

        let body = self
            .run(&endpoints::CREATE_RECORD, &draft.to_payload(), accepted_object)
            .await?;
        let created = CreatedRecord::from_body(body);
        info!(id = ?created.id, title = %draft.title, "record created");
        Ok(created)
    }

    /// Posts one chunk; true iff the server answered 200/201.
    pub async fn upload_file_chunk(&self, chunk: &UploadChunk<'_>) -> bool {
        if self.is_demo() {
            return true;
        }

        let request = ApiRequest::post(
            endpoints::UPLOAD_CHUNK_PATH,
            RequestBody::Multipart(chunk.to_multipart()),
        );
        let response = self.transport.request(&self.session, request).await;
        debug!(
            upload_id = %chunk.upload_id,
            index = chunk.index,
            total = chunk.total_chunks,
            status = response.status,
            "chunk posted"
        );
        response.is_accepted()
    }

    /// Uploads `attachment` in chunks of `chunk_size`, in order.
    ///
    /// Stops at the first chunk the server refuses; later chunks are never
    /// sent.
    pub async fn upload_attachment(
        &self,
        attachment: &Attachment,
        chunk_size: NonZeroUsize,
    ) -> UploadReport {
        let upload_id = Uuid::new_v4();
        let chunks = attachment.chunks(upload_id, chunk_size);
        let total_chunks = chunks.len();

        let mut chunks_sent = 0;
        for chunk in &chunks {
            if !self.upload_file_chunk(chunk).await {
                warn!(
                    %upload_id,
                    filename = %attachment.filename,
                    index = chunk.index,
                    total_chunks,
                    "chunk rejected, aborting upload"
                );
                break;
            }
            chunks_sent += 1;
        }

        let completed = chunks_sent == total_chunks;
        if completed {
            info!(%upload_id, filename = %attachment.filename, total_chunks, "upload complete");
        }
        UploadReport {
            upload_id,
            total_chunks,
            chunks_sent,
            completed,
        }
    }

    /// Uploads `attachment` in 1 MiB chunks.
    pub async fn upload_all(&self, attachment: &Attachment) -> UploadReport {
        self.upload_attachment(attachment, CHUNK_SIZE).await
    }
}

impl std::fmt::Debug for FestivalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FestivalClient")
            .field("base_url", &self.session.base_url())
            .field("demo_mode", &self.session.is_demo())
            .field("authenticated", &self.session.is_authenticated())
            .finish_non_exhaustive()
    }
}

fn summaries(items: &[Value]) -> Vec<RecordSummary> {
    items.iter().filter_map(RecordSummary::from_value).collect()
}
