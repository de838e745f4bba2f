//! JSON envelope spoken with a session based import endpoint, and the client side of it.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Error,
    config::Credentials,
    domain::{Behavior, EntityRecord},
    import::{ImportOutcome, ImportRequest, Importer},
};

/// A service endpoint answering serialized calls. `Err` carries the fault text.
pub trait WireEndpoint {
    fn dispatch(&mut self, payload: &str) -> Result<String, String>;
}

impl<E: WireEndpoint + ?Sized> WireEndpoint for &mut E {
    fn dispatch(&mut self, payload: &str) -> Result<String, String> {
        (**self).dispatch(payload)
    }
}

#[derive(Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
enum OutgoingCall<'a> {
    Login {
        user: &'a str,
        api_key: &'a str,
    },
    Call {
        session: &'a str,
        method: &'a str,
        entity: &'a str,
        behavior: Behavior,
        records: &'a [EntityRecord],
    },
    EndSession {
        session: &'a str,
    },
}

#[derive(Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub(crate) enum IncomingCall {
    Login {
        user: String,
        api_key: String,
    },
    Call {
        session: String,
        method: String,
        entity: String,
        behavior: Behavior,
        records: Vec<EntityRecord>,
    },
    EndSession {
        session: String,
    },
}

/// Importer talking to a [`WireEndpoint`] within a login session.
#[derive(Debug)]
pub struct WireClient<E: WireEndpoint> {
    endpoint: E,
    session: String,
}

impl<E: WireEndpoint> WireClient<E> {
    /// Logs in and keeps the session for all further calls.
    pub fn connect(mut endpoint: E, credentials: &Credentials) -> Result<Self, Error> {
        let login = serde_json::to_string(&OutgoingCall::Login {
            user: &credentials.user,
            api_key: &credentials.api_key,
        })?;
        let session = endpoint.dispatch(&login).map_err(Error::Authentication)?;
        info!(user = %credentials.user, "connected to import service");
        Ok(Self { endpoint, session })
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Ends the session and hands back the endpoint.
    pub fn close(mut self) -> Result<E, Error> {
        let end = serde_json::to_string(&OutgoingCall::EndSession {
            session: &self.session,
        })?;
        if let Err(fault) = self.endpoint.dispatch(&end) {
            warn!(%fault, "failed to end import session");
        }
        Ok(self.endpoint)
    }
}

impl<E: WireEndpoint> Importer for WireClient<E> {
    fn import(&mut self, request: ImportRequest<'_>) -> ImportOutcome {
        let call = OutgoingCall::Call {
            session: &self.session,
            method: request.method(),
            entity: request.kind.code(),
            behavior: request.behavior,
            records: request.records,
        };
        let payload = match serde_json::to_string(&call) {
            Ok(payload) => payload,
            Err(e) => return ImportOutcome::OpaqueFailure(e.to_string()),
        };

        match self.endpoint.dispatch(&payload) {
            Ok(_) => ImportOutcome::Success,
            Err(fault) => ImportOutcome::from_fault(&fault),
        }
    }
}
