use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::CodeRefineApi;
use super::types::{ReviewRequest, ReviewResult, TranslateRequest, TranslateResponse};
use crate::errors::ApiError;

struct Scripted<T> {
    delay: Duration,
    response: Result<T, ApiError>,
}

/// Deterministic [`CodeRefineApi`] that replays queued responses in order
/// and records every request it receives.
///
/// An empty queue answers with `ApiError::Unavailable`.
#[derive(Default)]
pub struct ScriptedApi {
    reviews: Mutex<VecDeque<Scripted<ReviewResult>>>,
    translations: Mutex<VecDeque<Scripted<TranslateResponse>>>,
    review_calls: Mutex<Vec<ReviewRequest>>,
    translate_calls: Mutex<Vec<TranslateRequest>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a review response delivered immediately.
    pub fn push_review(&self, response: Result<ReviewResult, ApiError>) -> &Self {
        self.push_review_after(Duration::ZERO, response)
    }

    /// Queue a review response delivered after `delay`.
    pub fn push_review_after(
        &self,
        delay: Duration,
        response: Result<ReviewResult, ApiError>,
    ) -> &Self {
        lock(&self.reviews).push_back(Scripted { delay, response });
        self
    }

    /// Queue a translated-code response delivered immediately.
    pub fn push_translation(&self, response: Result<String, ApiError>) -> &Self {
        self.push_translation_after(Duration::ZERO, response)
    }

    /// Queue a translated-code response delivered after `delay`.
    pub fn push_translation_after(
        &self,
        delay: Duration,
        response: Result<String, ApiError>,
    ) -> &Self {
        let response = response.map(|translated_code| TranslateResponse { translated_code });
        lock(&self.translations).push_back(Scripted { delay, response });
        self
    }

    pub fn review_calls(&self) -> Vec<ReviewRequest> {
        lock(&self.review_calls).clone()
    }

    pub fn translate_calls(&self) -> Vec<TranslateRequest> {
        lock(&self.translate_calls).clone()
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn deliver<T>(next: Option<Scripted<T>>, channel: &str) -> Result<T, ApiError> {
    match next {
        Some(scripted) => {
            if !scripted.delay.is_zero() {
                tokio::time::sleep(scripted.delay).await;
            }
            scripted.response
        }
        None => Err(ApiError::Unavailable(format!(
            "no scripted {} response",
            channel
        ))),
    }
}

#[async_trait]
impl CodeRefineApi for ScriptedApi {
    async fn review(&self, request: &ReviewRequest) -> Result<ReviewResult, ApiError> {
        lock(&self.review_calls).push(request.clone());
        let next = lock(&self.reviews).pop_front();
        deliver(next, "review").await
    }

    async fn translate(&self, request: &TranslateRequest) -> Result<TranslateResponse, ApiError> {
        lock(&self.translate_calls).push(request.clone());
        let next = lock(&self.translations).pop_front();
        deliver(next, "translate").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(code: &str) -> ReviewRequest {
        ReviewRequest { code: code.into() }
    }

    #[tokio::test]
    async fn test_empty_queue_is_unavailable() {
        let api = ScriptedApi::new();
        let err = api.review(&request("x")).await.unwrap_err();
        assert!(matches!(err, ApiError::Unavailable(_)));
        assert_eq!(api.review_calls(), vec![request("x")]);
    }

    #[tokio::test]
    async fn test_translations_replay_in_order() {
        let api = ScriptedApi::new();
        api.push_translation(Ok("fn a() {}".into()))
            .push_translation(Err(ApiError::Unavailable("down".into())));
        let req = TranslateRequest {
            code: "x".into(),
            target_language: "Rust".into(),
        };
        assert_eq!(api.translate(&req).await.unwrap().translated_code, "fn a() {}");
        assert!(api.translate(&req).await.is_err());
        assert_eq!(api.translate_calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_response_waits() {
        let api = ScriptedApi::new();
        api.push_translation_after(Duration::from_millis(300), Ok("late".into()));
        let req = TranslateRequest {
            code: "x".into(),
            target_language: "Go".into(),
        };
        let start = tokio::time::Instant::now();
        api.translate(&req).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
