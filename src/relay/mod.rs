//! Template-and-delegate relay: form field → prompt → model → trimmed text.
//!
//! One handler, parameterized by [`RelayTask`], serves all three pipeline
//! steps. Each call is stateless:
//! 1. Pull the task's form field (missing or empty → 400, no model call)
//! 2. Render the task's prompt template around the raw text
//! 3. Call the model exactly once
//! 4. Trim the answer and wrap it in a [`RelayEnvelope`]

pub mod envelope;
pub mod prompts;

pub use envelope::RelayEnvelope;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::RelayError;
use crate::llm::{CompletionRequest, LlmProvider};

/// Output budget for every relay call. Some backends reject requests without one.
const RELAY_MAX_TOKENS: u32 = 8192;

/// The three pipeline steps exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayTask {
    /// Segment pasted text into discrete emails.
    Split,
    /// Label each email Produtivo / Improdutivo.
    Classify,
    /// Append a suggested reply to each classified email.
    DraftReply,
}

impl RelayTask {
    pub const ALL: [RelayTask; 3] = [Self::Split, Self::Classify, Self::DraftReply];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Split => "split",
            Self::Classify => "classify",
            Self::DraftReply => "draft_reply",
        }
    }

    /// Route the task is served on.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Split => "/processar_emails",
            Self::Classify => "/classificar_emails",
            Self::DraftReply => "/responder_emails",
        }
    }

    /// Form field carrying the input text.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Split => "texto_emails",
            Self::Classify => "emails_separados",
            Self::DraftReply => "emails_classificados",
        }
    }

    pub fn template(&self) -> &'static str {
        match self {
            Self::Split => prompts::SPLIT_TEMPLATE,
            Self::Classify => prompts::CLASSIFY_TEMPLATE,
            Self::DraftReply => prompts::DRAFT_REPLY_TEMPLATE,
        }
    }

    pub fn render(&self, text: &str) -> String {
        prompts::render_prompt(self.template(), text)
    }
}

/// Look up `field` in a decoded form body. Absent and empty are both missing.
pub fn extract_field<'a>(
    form: &'a HashMap<String, String>,
    field: &str,
) -> Result<&'a str, RelayError> {
    match form.get(field) {
        Some(value) if !value.is_empty() => Ok(value.as_str()),
        _ => Err(RelayError::MissingInput {
            field: field.to_string(),
        }),
    }
}

/// Runs relay tasks against a shared model provider.
#[derive(Clone)]
pub struct RelayHandler {
    llm: Arc<dyn LlmProvider>,
}

impl RelayHandler {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Handle one request body for `task`. Never fails; errors become envelopes.
    pub async fn handle(&self, task: RelayTask, form: &HashMap<String, String>) -> RelayEnvelope {
        let request_id = Uuid::new_v4();
        let result = self.run(task, form, request_id).await;

        match &result {
            Ok(payload) => info!(
                %request_id,
                task = task.name(),
                output_len = payload.len(),
                "Relay succeeded"
            ),
            Err(RelayError::MissingInput { field }) => {
                warn!(%request_id, task = task.name(), field = %field, "Relay rejected: no input")
            }
            Err(e) => error!(%request_id, task = task.name(), error = %e, "Relay failed"),
        }

        RelayEnvelope::from(result)
    }

    async fn run(
        &self,
        task: RelayTask,
        form: &HashMap<String, String>,
        request_id: Uuid,
    ) -> Result<String, RelayError> {
        let text = extract_field(form, task.field())?;

        info!(
            %request_id,
            task = task.name(),
            model = self.llm.model_name(),
            input_len = text.len(),
            "Delegating to model"
        );

        let prompt = task.render(text);
        debug!(%request_id, prompt = %prompt, "Rendered prompt");

        let request = CompletionRequest::new(prompt).with_max_tokens(RELAY_MAX_TOKENS);
        let response = self.llm.complete(request).await?;

        debug!(%request_id, response = %response.content, "Raw model response");

        let trimmed = response.content.trim();
        if trimmed.is_empty() {
            return Err(RelayError::UnparseableResponse {
                raw: response.content,
            });
        }

        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::stub::StubLlm;
    use crate::relay::envelope::{MISSING_INPUT_MESSAGE, UNPARSEABLE_MESSAGE};

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn handler(stub: &Arc<StubLlm>) -> RelayHandler {
        let llm: Arc<dyn LlmProvider> = stub.clone();
        RelayHandler::new(llm)
    }

    #[test]
    fn task_table_is_distinct() {
        let paths: std::collections::HashSet<_> = RelayTask::ALL.iter().map(|t| t.path()).collect();
        let fields: std::collections::HashSet<_> =
            RelayTask::ALL.iter().map(|t| t.field()).collect();
        assert_eq!(paths.len(), 3);
        assert_eq!(fields.len(), 3);
        assert_eq!(RelayTask::Split.field(), "texto_emails");
        assert_eq!(RelayTask::Classify.path(), "/classificar_emails");
        assert_eq!(RelayTask::DraftReply.field(), "emails_classificados");
    }

    #[test]
    fn extract_field_rejects_absent_and_empty() {
        let f = form(&[("texto_emails", ""), ("other", "x")]);
        assert!(matches!(
            extract_field(&f, "texto_emails"),
            Err(RelayError::MissingInput { .. })
        ));
        assert!(matches!(
            extract_field(&f, "emails_separados"),
            Err(RelayError::MissingInput { ref field }) if field == "emails_separados"
        ));
        assert_eq!(extract_field(&f, "other").unwrap(), "x");
    }

    #[test]
    fn extract_field_keeps_whitespace_only_values() {
        let f = form(&[("texto_emails", "   ")]);
        assert_eq!(extract_field(&f, "texto_emails").unwrap(), "   ");
    }

    #[tokio::test]
    async fn missing_input_makes_no_model_call() {
        let stub = Arc::new(StubLlm::replying("unused"));
        let relay = handler(&stub);

        for task in RelayTask::ALL {
            let env = relay.handle(task, &form(&[])).await;
            assert_eq!(
                env,
                RelayEnvelope::MissingInput {
                    erro: MISSING_INPUT_MESSAGE.to_string()
                }
            );
            let env = relay.handle(task, &form(&[(task.field(), "")])).await;
            assert!(!env.is_success());
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn wrong_field_name_is_missing_input() {
        let stub = Arc::new(StubLlm::replying("unused"));
        let relay = handler(&stub);

        let env = relay
            .handle(RelayTask::Classify, &form(&[("texto_emails", "Oi")]))
            .await;
        assert!(matches!(env, RelayEnvelope::MissingInput { .. }));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn success_trims_only_outer_whitespace() {
        let stub = Arc::new(StubLlm::replying("\n\t Email A\n\n-----\n  Email B  \n"));
        let relay = handler(&stub);

        let env = relay
            .handle(RelayTask::Split, &form(&[("texto_emails", "Hi Bob, ... Thanks, Alice")]))
            .await;
        assert_eq!(env.payload(), Some("Email A\n\n-----\n  Email B"));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn prompt_embeds_raw_text_in_task_template() {
        let stub = Arc::new(StubLlm::replying("ok"));
        let relay = handler(&stub);
        let raw = "Email 1 ----- Email 2";

        relay
            .handle(RelayTask::DraftReply, &form(&[("emails_classificados", raw)]))
            .await;

        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], RelayTask::DraftReply.render(raw));
        assert!(prompts[0].contains(raw));
        assert!(prompts[0].contains(prompts::REPLY_MARKER));
    }

    #[tokio::test]
    async fn delegate_failure_reports_error_string() {
        let stub = Arc::new(StubLlm::failing("quota exceeded for gemini-2.5-flash"));
        let relay = handler(&stub);

        let env = relay
            .handle(RelayTask::Classify, &form(&[("emails_separados", "a-----b")]))
            .await;
        assert_eq!(
            env,
            RelayEnvelope::DelegateFailure {
                sucesso: false,
                erro: "Provider stub rate limited: quota exceeded for gemini-2.5-flash"
                    .to_string(),
            }
        );
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn blank_model_response_is_unparseable() {
        let stub = Arc::new(StubLlm::replying(" \n\t "));
        let relay = handler(&stub);

        let env = relay
            .handle(RelayTask::Split, &form(&[("texto_emails", "Oi")]))
            .await;
        assert_eq!(
            env,
            RelayEnvelope::Unparseable {
                sucesso: false,
                mensagem: UNPARSEABLE_MESSAGE.to_string(),
                resposta_bruta: " \n\t ".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn identical_input_gives_identical_envelopes() {
        let stub = Arc::new(StubLlm::replying("  Email A-----Email B "));
        let relay = handler(&stub);
        let f = form(&[("texto_emails", "same text")]);

        let first = relay.handle(RelayTask::Split, &f).await;
        let second = relay.handle(RelayTask::Split, &f).await;
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
        assert_eq!(stub.calls(), 2);
    }
}
