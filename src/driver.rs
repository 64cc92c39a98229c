//! Line-delimited JSON driver
//!
//! One event per input line, one reply per output line, written in input
//! order so the n-th reply always answers the n-th event. Turns run
//! concurrently; at most `MAX_IN_FLIGHT` wait to be written at once.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{SkillError, SkillResult};
use crate::skill::{Skill, TurnOutcome};

/// Turns started but not yet written
pub const MAX_IN_FLIGHT: usize = 64;

/// Run every event from `input` and write the replies to `output`
///
/// Blank lines are skipped. Returns the number of replies written.
pub async fn serve_lines<R, W>(skill: Arc<Skill>, input: R, mut output: W) -> SkillResult<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::channel::<JoinHandle<TurnOutcome>>(MAX_IN_FLIGHT);

    let reader = async move {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let skill = skill.clone();
            let turn = tokio::spawn(async move { skill.invoke(&line).await });
            if tx.send(turn).await.is_err() {
                tracing::warn!("Reply writer stopped, no more events read");
                break;
            }
        }
        Ok::<_, SkillError>(())
    };

    let writer = async {
        let mut written = 0;
        while let Some(turn) = rx.recv().await {
            let outcome = turn.await.unwrap_or_else(|err| {
                let message = SkillError::other(format!("Turn task failed: {}", err)).failure_message();
                tracing::error!("{}", message);
                TurnOutcome::Fail(message)
            });

            let line = outcome.to_json()?.to_string();
            output.write_all(line.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
            written += 1;
        }
        Ok::<_, SkillError>(written)
    };

    let (read, written) = tokio::join!(reader, writer);
    read?;
    let written = written?;
    tracing::info!("Wrote {} replies", written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::core::SkillConfig;
    use crate::health::fakes::Harness;
    use crate::intents::{IntentHandler, IntentRegistry};
    use crate::skill::{FinalResponse, Response, TurnContext};

    /// Sleeps for the "delay" slot in ms, then speaks it
    struct Sleepy;

    #[async_trait]
    impl IntentHandler for Sleepy {
        fn name(&self) -> &str {
            "SleepIntent"
        }

        async fn handle(
            &self,
            turn: &mut TurnContext<'_>,
            mut response: Response,
        ) -> SkillResult<FinalResponse> {
            let delay = turn.slots.get("delay").unwrap_or("0").to_string();
            tokio::time::sleep(Duration::from_millis(delay.parse().unwrap_or(0))).await;
            response.speech_text = delay;
            Ok(response.finish())
        }
    }

    struct Panicking;

    #[async_trait]
    impl IntentHandler for Panicking {
        fn name(&self) -> &str {
            "PanicIntent"
        }

        async fn handle(
            &self,
            _turn: &mut TurnContext<'_>,
            _response: Response,
        ) -> SkillResult<FinalResponse> {
            panic!("handler blew up");
        }
    }

    fn skill() -> Arc<Skill> {
        let mut intents = IntentRegistry::new();
        intents.register(Sleepy).register(Panicking);
        Arc::new(Skill::new(
            SkillConfig::new("app"),
            Harness::signed_in().services,
            Sleepy,
            intents,
        ))
    }

    fn event(intent: &str, delay: u64) -> String {
        json!({
            "session": { "sessionId": "s1", "application": { "applicationId": "app" } },
            "request": {
                "type": "IntentRequest",
                "requestId": format!("r-{}", delay),
                "intent": { "name": intent, "slots": { "delay": { "name": "delay", "value": delay.to_string() } } }
            }
        })
        .to_string()
    }

    async fn run(input: String) -> (usize, Vec<Value>) {
        let mut out = Vec::new();
        let written = serve_lines(skill(), input.as_bytes(), &mut out).await.unwrap();
        let replies = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (written, replies)
    }

    fn speech(reply: &Value) -> &str {
        reply["response"]["outputSpeech"]["ssml"].as_str().unwrap()
    }

    #[tokio::test]
    async fn test_replies_follow_input_order() {
        let input = format!("{}\n{}\n", event("SleepIntent", 200), event("SleepIntent", 0));

        let (written, replies) = run(input).await;

        assert_eq!(written, 2);
        assert_eq!(speech(&replies[0]), "<speak>200</speak>");
        assert_eq!(speech(&replies[1]), "<speak>0</speak>");
    }

    #[tokio::test]
    async fn test_failed_turns_keep_their_place() {
        let input = format!(
            "{}\nnot json\n{}\n",
            event("SleepIntent", 50),
            event("SleepIntent", 0)
        );

        let (written, replies) = run(input).await;

        assert_eq!(written, 3);
        assert_eq!(speech(&replies[0]), "<speak>50</speak>");
        assert!(replies[1]["errorMessage"]
            .as_str()
            .unwrap()
            .starts_with("Exception: Serialization error"));
        assert_eq!(speech(&replies[2]), "<speak>0</speak>");
    }

    #[tokio::test]
    async fn test_panicking_turn_still_gets_a_line() {
        let input = format!("{}\n{}\n", event("PanicIntent", 0), event("SleepIntent", 0));

        let (written, replies) = run(input).await;

        assert_eq!(written, 2);
        let message = replies[0]["errorMessage"].as_str().unwrap();
        assert!(message.starts_with("Exception: Turn task failed"));
        assert_eq!(speech(&replies[1]), "<speak>0</speak>");
    }

    #[tokio::test]
    async fn test_blank_lines_skipped() {
        let input = format!("\n  \n{}\n\n", event("SleepIntent", 0));

        let (written, replies) = run(input).await;

        assert_eq!(written, 1);
        assert_eq!(replies.len(), 1);
    }
}
