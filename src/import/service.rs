//! In-process import service: validates the submitted rows the way the remote service would.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::{
    config::Credentials,
    domain::EntityKind,
    import::{
        ImportOutcome, ImportRequest, Importer, method_for,
        validation::validate,
        wire::{IncomingCall, WireEndpoint},
    },
};

pub(crate) const ACCESS_DENIED: &str = "Access denied.";
pub(crate) const SESSION_EXPIRED: &str = "Session expired. Try to relogin.";
pub(crate) const NOT_CALLABLE: &str = "Resource path is not callable.";

/// Import service living in the benchmark process.
///
/// Used directly it is the in-process import path. Behind a [`crate::WireClient`] it plays the
/// remote service and additionally enforces logins and sessions.
#[derive(Debug)]
pub struct InProcessImporter {
    credentials: Credentials,
    sessions: HashSet<String>,
    issued_sessions: u64,
    accepted_rows: usize,
}

impl InProcessImporter {
    /// Creates a service that grants sessions to `credentials` only.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            sessions: HashSet::new(),
            issued_sessions: 0,
            accepted_rows: 0,
        }
    }

    /// Number of rows that passed validation so far.
    pub fn accepted_rows(&self) -> usize {
        self.accepted_rows
    }

    /// Number of sessions that are currently open.
    pub fn open_sessions(&self) -> usize {
        self.sessions.len()
    }

    fn open_session(&mut self) -> String {
        self.issued_sessions += 1;
        let session = format!("session-{:08x}", self.issued_sessions);
        self.sessions.insert(session.clone());
        session
    }
}

impl Importer for InProcessImporter {
    fn import(&mut self, request: ImportRequest<'_>) -> ImportOutcome {
        let report = validate(request.kind, request.behavior, request.records);
        if report.is_empty() {
            self.accepted_rows += request.records.len();
            ImportOutcome::Success
        } else {
            // a bulk with invalid rows is rejected as a whole
            ImportOutcome::StructuredFailure(report)
        }
    }
}

impl WireEndpoint for InProcessImporter {
    fn dispatch(&mut self, payload: &str) -> Result<String, String> {
        let call: IncomingCall =
            serde_json::from_str(payload).map_err(|e| format!("Invalid request: {e}"))?;

        match call {
            IncomingCall::Login { user, api_key } => {
                if !self.credentials.matches(&user, &api_key) {
                    return Err(ACCESS_DENIED.to_string());
                }
                let session = self.open_session();
                info!(%user, "session opened");
                Ok(session)
            }
            IncomingCall::Call {
                session,
                method,
                entity,
                behavior,
                records,
            } => {
                if !self.sessions.contains(&session) {
                    return Err(SESSION_EXPIRED.to_string());
                }
                let kind: EntityKind = entity.parse()?;
                if method != method_for(kind) {
                    return Err(NOT_CALLABLE.to_string());
                }
                debug!(%method, rows = records.len(), "serving import call");

                match self.import(ImportRequest::new(&records, kind, behavior)) {
                    ImportOutcome::Success => Ok("true".to_string()),
                    ImportOutcome::StructuredFailure(report) => {
                        Err(serde_json::to_string(&report).unwrap_or_else(|e| e.to_string()))
                    }
                    ImportOutcome::OpaqueFailure(message) => Err(message),
                }
            }
            IncomingCall::EndSession { session } => {
                if self.sessions.remove(&session) {
                    Ok("true".to_string())
                } else {
                    Err(SESSION_EXPIRED.to_string())
                }
            }
        }
    }
}
