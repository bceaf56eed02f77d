//! ReAct loop: call the model, run whatever tools it asked for, feed the
//! results back, repeat until the model answers without tool calls.

mod error;

use std::sync::Arc;

use futures::stream;
use island_llm::chat::{ChatMessage, ChatRole, MessageType};
use island_llm::{LLMProvider, ToolCall, ToolT};
use log::{debug, info, warn};

pub use error::{AgentBuildError, AgentError};

use crate::memory::{Checkpointer, MemorySaver};
use crate::protocol::{AgentEventStream, StreamEvent};
use crate::session::SessionConfig;
use crate::tool::{tool_result, ToolRegistry};

/// Graph steps allowed per run before it is aborted.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

#[derive(Clone)]
pub struct ReActAgent {
    llm: Arc<dyn LLMProvider>,
    tools: Arc<ToolRegistry>,
    checkpointer: Arc<dyn Checkpointer>,
    system_prompt: Option<String>,
    recursion_limit: usize,
}

impl std::fmt::Debug for ReActAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReActAgent")
            .field("tools", &self.tools.names())
            .field("has_system_prompt", &self.system_prompt.is_some())
            .field("recursion_limit", &self.recursion_limit)
            .finish()
    }
}

impl ReActAgent {
    pub fn builder() -> ReActAgentBuilder {
        ReActAgentBuilder::default()
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    pub fn checkpointer(&self) -> Arc<dyn Checkpointer> {
        Arc::clone(&self.checkpointer)
    }

    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Stored conversation for the session's thread.
    pub async fn history(&self, config: &SessionConfig) -> Result<Vec<ChatMessage>, AgentError> {
        Ok(self.checkpointer.messages(config.thread_id()).await?)
    }

    /// Run the agent on `input` and stream one event per graph step.
    ///
    /// The run resumes from the thread's latest checkpoint and writes a new one
    /// after every step. Nothing happens until the stream is polled. An error
    /// ends the stream.
    pub fn stream(&self, input: Vec<ChatMessage>, config: &SessionConfig) -> AgentEventStream {
        let run = Run {
            agent: self.clone(),
            thread_id: config.thread_id().to_string(),
            history: vec![],
            steps: 0,
            phase: Phase::Start(input),
        };

        Box::pin(stream::unfold(run, |mut run| async move {
            match run.step().await {
                Ok(Some(event)) => Some((Ok(event), run)),
                Ok(None) => None,
                Err(e) => {
                    run.phase = Phase::Done;
                    Some((Err(e), run))
                }
            }
        }))
    }
}

enum Phase {
    Start(Vec<ChatMessage>),
    CallModel,
    RunTools(Vec<ToolCall>),
    Done,
}

struct Run {
    agent: ReActAgent,
    thread_id: String,
    history: Vec<ChatMessage>,
    steps: usize,
    phase: Phase,
}

impl Run {
    async fn step(&mut self) -> Result<Option<StreamEvent>, AgentError> {
        loop {
            match std::mem::replace(&mut self.phase, Phase::Done) {
                Phase::Start(input) => {
                    self.history = self.agent.checkpointer.messages(&self.thread_id).await?;
                    debug!(
                        "thread {:?} resumes with {} messages",
                        self.thread_id,
                        self.history.len()
                    );
                    self.history.extend(input);
                    self.checkpoint().await?;
                    self.phase = Phase::CallModel;
                }
                Phase::CallModel => {
                    self.count_step()?;
                    let message = self.call_model().await?;
                    self.phase = match message.tool_calls() {
                        Some(calls) => Phase::RunTools(calls.to_vec()),
                        None => Phase::Done,
                    };
                    self.history.push(message.clone());
                    self.checkpoint().await?;
                    return Ok(Some(StreamEvent::agent(vec![message])));
                }
                Phase::RunTools(calls) => {
                    if let Err(e) = self.count_step() {
                        self.abandon(&calls, &e).await?;
                        return Err(e);
                    }
                    let results = self.run_tools(calls).await?;
                    self.checkpoint().await?;
                    self.phase = Phase::CallModel;
                    return Ok(Some(StreamEvent::tools(results)));
                }
                Phase::Done => return Ok(None),
            }
        }
    }

    fn count_step(&mut self) -> Result<(), AgentError> {
        self.steps += 1;
        if self.steps > self.agent.recursion_limit {
            return Err(AgentError::RecursionLimit {
                limit: self.agent.recursion_limit,
            });
        }
        Ok(())
    }

    async fn call_model(&self) -> Result<ChatMessage, AgentError> {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        if let Some(prompt) = &self.agent.system_prompt {
            messages.push(ChatMessage {
                role: ChatRole::System,
                message_type: MessageType::Text,
                content: prompt.clone(),
            });
        }
        messages.extend(self.history.iter().cloned());

        let response = if self.agent.tools.is_empty() {
            self.agent.llm.chat(&messages).await?
        } else {
            let descriptors = self.agent.tools.descriptors();
            self.agent
                .llm
                .chat_with_tools(&messages, Some(&descriptors))
                .await?
        };

        let text = response.text().unwrap_or_default();
        Ok(match response.tool_calls() {
            Some(calls) if !calls.is_empty() => {
                info!(
                    "model requested tools: {}",
                    calls
                        .iter()
                        .map(|c| c.function.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                ChatMessage::assistant().content(text).tool_use(calls).build()
            }
            _ => ChatMessage::assistant().content(text).build(),
        })
    }

    /// Tools are blocking (wallet calls go over a synchronous client), so each
    /// call runs on the blocking pool. Calls run one after another in the order
    /// the model listed them. Results are appended to the history as they come.
    async fn run_tools(&mut self, calls: Vec<ToolCall>) -> Result<Vec<ChatMessage>, AgentError> {
        let mut results = Vec::with_capacity(calls.len());
        for (i, call) in calls.iter().enumerate() {
            let tools = Arc::clone(&self.agent.tools);
            let owned = call.clone();
            match tokio::task::spawn_blocking(move || tools.invoke(&owned)).await {
                Ok(message) => {
                    self.history.push(message.clone());
                    results.push(message);
                }
                Err(e) => {
                    let err = AgentError::ToolTask(e.to_string());
                    self.abandon(&calls[i..], &err).await?;
                    return Err(err);
                }
            }
        }
        Ok(results)
    }

    /// Answer `calls` with an error result and checkpoint, so the stored thread
    /// never holds a tool request without its results.
    async fn abandon(&mut self, calls: &[ToolCall], err: &AgentError) -> Result<(), AgentError> {
        warn!("run on thread {:?} stopped: {err}", self.thread_id);
        self.history.extend(
            calls
                .iter()
                .map(|call| tool_result(call, format!("Error: {err}"))),
        );
        self.checkpoint().await
    }

    async fn checkpoint(&self) -> Result<(), AgentError> {
        self.agent
            .checkpointer
            .put(&self.thread_id, self.history.clone())
            .await?;
        Ok(())
    }
}

pub struct ReActAgentBuilder {
    llm: Option<Arc<dyn LLMProvider>>,
    tools: Vec<Arc<dyn ToolT>>,
    checkpointer: Option<Arc<dyn Checkpointer>>,
    system_prompt: Option<String>,
    recursion_limit: usize,
}

impl Default for ReActAgentBuilder {
    fn default() -> Self {
        Self {
            llm: None,
            tools: vec![],
            checkpointer: None,
            system_prompt: None,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl ReActAgentBuilder {
    pub fn with_llm(mut self, llm: Arc<dyn LLMProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Append tools; registration order is kept.
    pub fn with_tools<I>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn ToolT>>,
    {
        self.tools.extend(tools);
        self
    }

    /// Where conversation state is kept. Defaults to a fresh [`MemorySaver`].
    pub fn with_checkpointer(mut self, checkpointer: Arc<dyn Checkpointer>) -> Self {
        self.checkpointer = Some(checkpointer);
        self
    }

    /// Prepended to every model call. Never written to the thread history.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn build(self) -> Result<ReActAgent, AgentBuildError> {
        let llm = self.llm.ok_or(AgentBuildError::MissingLlm)?;
        let mut tools = ToolRegistry::new();
        tools.extend(self.tools)?;
        Ok(ReActAgent {
            llm,
            tools: Arc::new(tools),
            checkpointer: self
                .checkpointer
                .unwrap_or_else(|| Arc::new(MemorySaver::new())),
            system_prompt: self.system_prompt,
            recursion_limit: self.recursion_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use island_llm::ToolCallError;
    use island_test_utils::{MockResponse, ScriptedLLM};
    use serde_json::{json, Value};

    #[derive(Debug)]
    struct Balance;

    impl ToolT for Balance {
        fn name(&self) -> &str {
            "get_balance"
        }

        fn description(&self) -> &str {
            "Get the balance of an asset"
        }

        fn args_schema(&self) -> Value {
            json!({"type": "object", "properties": {"asset_id": {"type": "string"}}})
        }

        fn run(&self, args: Value) -> Result<Value, ToolCallError> {
            let asset = args["asset_id"].as_str().unwrap_or("eth");
            Ok(json!(format!("1.5 {asset}")))
        }
    }

    fn agent(llm: Arc<ScriptedLLM>) -> ReActAgent {
        ReActAgent::builder()
            .with_llm(llm)
            .with_tools([Arc::new(Balance) as Arc<dyn ToolT>])
            .with_system_prompt("you are ava")
            .build()
            .unwrap()
    }

    fn user(text: &str) -> Vec<ChatMessage> {
        vec![ChatMessage::user().content(text).build()]
    }

    async fn collect(stream: AgentEventStream) -> Vec<Result<StreamEvent, AgentError>> {
        stream.collect().await
    }

    #[test]
    fn test_build_requires_llm() {
        let err = ReActAgent::builder().build().unwrap_err();
        assert!(matches!(err, AgentBuildError::MissingLlm));
    }

    #[test]
    fn test_build_rejects_duplicate_tools() {
        let err = ReActAgent::builder()
            .with_llm(Arc::new(ScriptedLLM::default()))
            .with_tools([
                Arc::new(Balance) as Arc<dyn ToolT>,
                Arc::new(Balance) as Arc<dyn ToolT>,
            ])
            .build()
            .unwrap_err();
        assert!(matches!(err, AgentBuildError::DuplicateTool(_)));
    }

    #[tokio::test]
    async fn test_plain_answer_is_single_agent_event() {
        let llm = Arc::new(ScriptedLLM::new(vec![MockResponse::text("gm anon")]));
        let agent = agent(llm.clone());
        let config = SessionConfig::new("t");

        let events = collect(agent.stream(user("gm"), &config)).await;
        assert_eq!(events.len(), 1);
        let event = events[0].as_ref().unwrap();
        assert_eq!(event.node(), "agent");
        assert_eq!(event.messages()[0].content, "gm anon");

        let sent = &llm.requests()[0];
        assert_eq!(sent[0].role, ChatRole::System);
        assert_eq!(sent[0].content, "you are ava");
        assert_eq!(llm.offered_tools()[0], vec!["get_balance"]);
    }

    #[tokio::test]
    async fn test_tool_round_trip_emits_agent_tools_agent() {
        let llm = Arc::new(ScriptedLLM::new(vec![
            MockResponse::calls(&[("get_balance", r#"{"asset_id":"usdc"}"#)]),
            MockResponse::text("you hold 1.5 usdc"),
        ]));
        let agent = agent(llm.clone());
        let config = SessionConfig::new("t");

        let events: Vec<StreamEvent> = collect(agent.stream(user("bal?"), &config))
            .await
            .into_iter()
            .map(Result::unwrap)
            .collect();

        let nodes: Vec<&str> = events.iter().map(StreamEvent::node).collect();
        assert_eq!(nodes, vec!["agent", "tools", "agent"]);
        assert_eq!(events[1].messages()[0].content, "1.5 usdc");
        assert_eq!(events[2].messages()[0].content, "you hold 1.5 usdc");

        // second model call sees the tool result
        let second = &llm.requests()[1];
        assert_eq!(second.last().unwrap().role, ChatRole::Tool);
    }

    #[tokio::test]
    async fn test_history_persists_across_runs() {
        let llm = Arc::new(ScriptedLLM::new(vec![
            MockResponse::text("one"),
            MockResponse::text("two"),
        ]));
        let agent = agent(llm.clone());
        let config = SessionConfig::new("thread");

        collect(agent.stream(user("first"), &config)).await;
        collect(agent.stream(user("second"), &config)).await;

        let history = agent.history(&config).await.unwrap();
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "one", "second", "two"]);
        // system prompt is sent but never stored
        assert_eq!(llm.requests()[1].len(), 4);

        let other = agent.history(&SessionConfig::new("other")).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_llm_error_ends_stream() {
        let agent = agent(Arc::new(ScriptedLLM::default()));
        let events = collect(agent.stream(user("gm"), &SessionConfig::new("t"))).await;
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], Err(AgentError::Llm(_))));
    }

    #[tokio::test]
    async fn test_recursion_limit() {
        let llm = Arc::new(ScriptedLLM::new(vec![
            MockResponse::calls(&[("get_balance", "{}")]),
            MockResponse::calls(&[("get_balance", "{}")]),
        ]));
        let agent = ReActAgent::builder()
            .with_llm(llm)
            .with_tools([Arc::new(Balance) as Arc<dyn ToolT>])
            .recursion_limit(3)
            .build()
            .unwrap();

        let events = collect(agent.stream(user("loop"), &SessionConfig::new("t"))).await;
        assert_eq!(events.len(), 4);
        assert!(events[..3].iter().all(Result::is_ok));
        assert!(matches!(
            events[3],
            Err(AgentError::RecursionLimit { limit: 3 })
        ));
    }

    #[tokio::test]
    async fn test_recursion_limit_leaves_thread_answerable() {
        let llm = Arc::new(ScriptedLLM::new(vec![
            MockResponse::calls(&[("get_balance", "{}")]),
            MockResponse::calls(&[("get_balance", "{}")]),
            MockResponse::text("gm"),
        ]));
        let agent = ReActAgent::builder()
            .with_llm(llm.clone())
            .with_tools([Arc::new(Balance) as Arc<dyn ToolT>])
            .recursion_limit(3)
            .build()
            .unwrap();
        let config = SessionConfig::new("t");

        let events = collect(agent.stream(user("loop"), &config)).await;
        assert!(matches!(
            events.last(),
            Some(Err(AgentError::RecursionLimit { limit: 3 }))
        ));

        let history = agent.history(&config).await.unwrap();
        let last = history.last().unwrap();
        assert_eq!(last.role, ChatRole::Tool);
        assert_eq!(
            last.content,
            "Error: Recursion limit of 3 reached without hitting a stop condition"
        );

        let events = collect(agent.stream(user("gm"), &config)).await;
        assert!(events.iter().all(Result::is_ok));

        // every tool request in the next call is followed by its results
        let sent = &llm.requests()[2];
        for (i, message) in sent.iter().enumerate() {
            if let MessageType::ToolUse(calls) = &message.message_type {
                let answered = &sent[i + 1..i + 1 + calls.len()];
                assert!(answered.iter().all(|m| m.role == ChatRole::Tool));
            }
        }
        assert_eq!(sent.last().unwrap().content, "gm");
    }
}
