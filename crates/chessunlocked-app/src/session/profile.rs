use std::{cell::RefCell, collections::BTreeMap, future};

use chrono::{DateTime, SecondsFormat, Utc};

use super::{AuthError, AuthFuture};

/// Profile document written once after a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub email: String,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub created_at: String,
}

impl ProfileRecord {
    #[must_use]
    pub fn new(email: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Document path of a user's profile within the app namespace.
#[must_use]
pub fn profile_document_path(app_id: &str, uid: &str) -> String {
    format!("artifacts/{app_id}/users/{uid}/profile/data")
}

/// Document store collaborator for user profiles.
pub trait ProfileStore {
    fn write_profile<'a>(&'a self, path: &'a str, record: &'a ProfileRecord)
    -> AuthFuture<'a, ()>;
}

/// Keeps profile documents in memory as JSON values.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    documents: RefCell<BTreeMap<String, serde_json::Value>>,
}

impl MemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn document(&self, path: &str) -> Option<serde_json::Value> {
        self.documents.borrow().get(path).cloned()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn write_profile<'a>(
        &'a self,
        path: &'a str,
        record: &'a ProfileRecord,
    ) -> AuthFuture<'a, ()> {
        let result = serde_json::to_value(record)
            .map(|value| {
                self.documents.borrow_mut().insert(path.to_owned(), value);
                log::debug!("wrote profile document {path}");
            })
            .map_err(|err| AuthError::Store {
                message: err.to_string(),
            });
        Box::pin(future::ready(result))
    }
}

#[cfg(test)]
mod tests {
    use std::task::{Context, Waker};

    use chrono::TimeZone as _;

    use super::*;

    #[test]
    fn record_uses_millisecond_utc_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
            + chrono::Duration::milliseconds(42);
        let record = ProfileRecord::new("player@example.com", at);
        assert_eq!(record.created_at, "2024-03-09T14:05:07.042Z");
    }

    #[test]
    fn document_path_layout() {
        assert_eq!(
            profile_document_path("chessunlocked", "user-1"),
            "artifacts/chessunlocked/users/user-1/profile/data"
        );
    }

    #[test]
    fn memory_store_writes_camel_case_document() {
        let store = MemoryProfileStore::new();
        let record = ProfileRecord {
            email: "player@example.com".to_owned(),
            created_at: "2024-03-09T14:05:07.042Z".to_owned(),
        };
        let path = profile_document_path("app", "u1");

        let mut write = store.write_profile(&path, &record);
        let mut cx = Context::from_waker(Waker::noop());
        assert!(write.as_mut().poll(&mut cx).is_ready());

        assert_eq!(
            store.document(&path),
            Some(serde_json::json!({
                "email": "player@example.com",
                "createdAt": "2024-03-09T14:05:07.042Z",
            }))
        );
        assert_eq!(store.document("artifacts/app/users/u2/profile/data"), None);
    }
}
