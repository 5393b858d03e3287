use std::collections::HashMap;
use std::sync::Mutex;

use axum::http::{ header, HeaderMap, HeaderValue, Response };
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sid";

/// One-shot success notices, keyed by session. A notice survives until the
/// next list render reads it, then it is gone.
#[derive(Default)]
pub struct FlashStore {
    notices: Mutex<HashMap<Uuid, String>>,
}

impl FlashStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, session: Uuid, message: impl Into<String>) {
        let mut notices = self.notices.lock().unwrap_or_else(|e| e.into_inner());
        notices.insert(session, message.into());
    }

    /// Read-and-clear: the same notice is never surfaced twice.
    pub fn take(&self, session: Uuid) -> Option<String> {
        let mut notices = self.notices.lock().unwrap_or_else(|e| e.into_inner());
        notices.remove(&session)
    }
}

/// The session identity of a page request, parsed from the `sid` cookie or
/// freshly issued when the request carries none.
pub struct Session {
    pub id: Uuid,
    fresh: bool,
}

impl Session {
    pub fn extract(headers: &HeaderMap) -> Self {
        match session_id_from_headers(headers) {
            Some(id) => Session { id, fresh: false },
            None => Session { id: Uuid::new_v4(), fresh: true },
        }
    }

    /// Attach a `Set-Cookie` header when this request had no session yet.
    pub fn apply<B>(&self, response: &mut Response<B>) {
        if !self.fresh {
            return;
        }
        let cookie = format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, self.id);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }
}

fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            value.parse().ok()
        } else {
            None
        }
    })
}
