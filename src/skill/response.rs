//! Response builder and outbound reply types
//!
//! A handler gets a fresh `Response`, sets fields on it, and consumes it
//! with `done` (or `finish`). Consuming is the only way to get a
//! `FinalResponse`, so a turn can render at most once. `fail` is the
//! other terminal path: it logs and produces an error instead of a reply.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::SkillError;

/// Wire format version of every reply
pub const RESPONSE_VERSION: &str = "1.0";

/// Optional overrides applied by `Response::done`
///
/// Each present field overwrites the builder's value; absent fields leave
/// it alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseOptions {
    pub speech_text: Option<String>,
    pub reprompt_text: Option<String>,
    pub ssml_enabled: Option<bool>,
    pub should_end_session: Option<bool>,
}

impl ResponseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speech(mut self, text: impl Into<String>) -> Self {
        self.speech_text = Some(text.into());
        self
    }

    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.reprompt_text = Some(text.into());
        self
    }

    pub fn ssml(mut self, enabled: bool) -> Self {
        self.ssml_enabled = Some(enabled);
        self
    }

    pub fn end_session(mut self, end: bool) -> Self {
        self.should_end_session = Some(end);
        self
    }
}

/// Mutable reply accumulator owned by one handler invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub speech_text: String,
    pub reprompt_text: Option<String>,
    /// Wrap speech in `<speak>` markup
    pub ssml_enabled: bool,
    pub should_end_session: bool,
    pub card_title: Option<String>,
    pub card_content: Option<String>,
    pub image_url: Option<String>,
    /// Render the card as a link-account prompt
    pub link_account: bool,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            speech_text: String::new(),
            reprompt_text: None,
            ssml_enabled: true,
            should_end_session: true,
            card_title: None,
            card_content: None,
            image_url: None,
            link_account: false,
        }
    }
}

impl Response {
    /// Create an empty response that ends the session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty response that keeps the session open
    pub fn continuing() -> Self {
        Self {
            should_end_session: false,
            ..Self::default()
        }
    }

    /// Attach a simple text card
    pub fn simple_card(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.card_title = Some(title.into());
        self.card_content = Some(content.into());
    }

    /// Attach a card with an image
    pub fn image_card(
        &mut self,
        title: impl Into<String>,
        text: impl Into<String>,
        image_url: impl Into<String>,
    ) {
        self.card_title = Some(title.into());
        self.card_content = Some(text.into());
        self.image_url = Some(image_url.into());
    }

    /// Attach a card prompting the user to link their account
    pub fn link_account_card(&mut self, title: impl Into<String>) {
        self.card_title = Some(title.into());
        self.link_account = true;
    }

    /// Merge `options` and finalize
    pub fn done(mut self, options: ResponseOptions) -> FinalResponse {
        if let Some(speech) = options.speech_text {
            self.speech_text = speech;
        }
        if let Some(reprompt) = options.reprompt_text {
            self.reprompt_text = Some(reprompt);
        }
        if let Some(ssml) = options.ssml_enabled {
            self.ssml_enabled = ssml;
        }
        if let Some(end) = options.should_end_session {
            self.should_end_session = end;
        }
        FinalResponse(self)
    }

    /// Finalize with the fields as currently set
    pub fn finish(self) -> FinalResponse {
        self.done(ResponseOptions::default())
    }

    /// Abandon the turn without a reply body
    pub fn fail(self, msg: impl Into<String>) -> SkillError {
        let msg = msg.into();
        tracing::error!("Turn failed: {}", msg);
        SkillError::Handler(msg)
    }
}

/// A finalized response, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct FinalResponse(Response);

impl FinalResponse {
    /// The merged builder state
    pub fn fields(&self) -> &Response {
        &self.0
    }

    pub fn should_end_session(&self) -> bool {
        self.0.should_end_session
    }

    /// Render the wire reply
    ///
    /// Session attributes are echoed back only while the session stays
    /// open and only if there are any.
    pub fn render(self, attributes: &Map<String, Value>) -> SkillResponse {
        let r = self.0;

        let reprompt = r.reprompt_text.as_ref().map(|text| Reprompt {
            output_speech: OutputSpeech::new(text, r.ssml_enabled),
        });

        let card = r.card_title.clone().map(|title| {
            if let Some(url) = r.image_url.clone() {
                Card::Standard {
                    title,
                    text: r.card_content.clone(),
                    image: CardImage {
                        small_image_url: url.clone(),
                        large_image_url: url,
                    },
                }
            } else if r.link_account {
                Card::LinkAccount { title }
            } else {
                Card::Simple {
                    title,
                    content: r.card_content.clone(),
                }
            }
        });

        let session_attributes = if !r.should_end_session && !attributes.is_empty() {
            Some(attributes.clone())
        } else {
            None
        };

        let rendered = SkillResponse {
            version: RESPONSE_VERSION.to_string(),
            response: ResponseBody {
                output_speech: OutputSpeech::new(&r.speech_text, r.ssml_enabled),
                should_end_session: r.should_end_session,
                reprompt,
                card,
            },
            session_attributes,
        };

        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Ok(json) = serde_json::to_string_pretty(&rendered) {
                tracing::debug!("Final response:\n{}", json);
            }
        }

        rendered
    }
}

/// Spoken output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
    PlainText { text: String },
}

impl OutputSpeech {
    pub fn new(text: &str, ssml_enabled: bool) -> Self {
        if ssml_enabled {
            OutputSpeech::Ssml {
                ssml: format!("<speak>{}</speak>", text),
            }
        } else {
            OutputSpeech::PlainText {
                text: text.to_string(),
            }
        }
    }

    /// Spoken text without the `<speak>` wrapper
    pub fn text(&self) -> &str {
        match self {
            OutputSpeech::Ssml { ssml } => ssml
                .strip_prefix("<speak>")
                .and_then(|s| s.strip_suffix("</speak>"))
                .unwrap_or(ssml),
            OutputSpeech::PlainText { text } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    pub small_image_url: String,
    pub large_image_url: String,
}

/// Visual companion to the spoken reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    Simple {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
    },
    Standard {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        image: CardImage,
    },
    LinkAccount {
        title: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    pub should_end_session: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
}

/// The rendered reply for one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    pub version: String,
    pub response: ResponseBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<Map<String, Value>>,
}

impl SkillResponse {
    /// Spoken text without markup
    pub fn speech_text(&self) -> &str {
        self.response.output_speech.text()
    }

    pub fn should_end_session(&self) -> bool {
        self.response.should_end_session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("lastParameter".into(), json!("heart rate"));
        map
    }

    #[test]
    fn test_defaults_render_ssml_and_end_session() {
        let reply = Response::new().finish().render(&Map::new());

        assert_eq!(reply.version, "1.0");
        assert!(reply.should_end_session());
        assert_eq!(
            reply.response.output_speech,
            OutputSpeech::Ssml {
                ssml: "<speak></speak>".into()
            }
        );
        assert!(reply.response.reprompt.is_none());
        assert!(reply.response.card.is_none());
    }

    #[test]
    fn test_empty_options_keep_manual_fields() {
        let mut response = Response::new();
        response.speech_text = "Good Bye.".into();
        response.reprompt_text = Some("Anything else?".into());
        response.ssml_enabled = false;
        response.should_end_session = false;

        let expected = response.clone();
        let finalized = response.done(ResponseOptions::new());
        assert_eq!(finalized.fields(), &expected);

        let reply = finalized.render(&Map::new());
        assert_eq!(
            reply.response.output_speech,
            OutputSpeech::PlainText {
                text: "Good Bye.".into()
            }
        );
        assert_eq!(
            reply.response.reprompt.unwrap().output_speech.text(),
            "Anything else?"
        );
        assert!(!reply.response.should_end_session);
    }

    #[test]
    fn test_options_overwrite_each_field() {
        let mut response = Response::new();
        response.speech_text = "old".into();

        let finalized = response.done(
            ResponseOptions::new()
                .speech("new")
                .reprompt("again?")
                .ssml(false)
                .end_session(false),
        );

        let fields = finalized.fields();
        assert_eq!(fields.speech_text, "new");
        assert_eq!(fields.reprompt_text.as_deref(), Some("again?"));
        assert!(!fields.ssml_enabled);
        assert!(!fields.should_end_session);
    }

    #[test]
    fn test_end_session_option_overrides_continuing() {
        let finalized = Response::continuing().done(ResponseOptions::new().end_session(true));
        assert!(finalized.should_end_session());
    }

    #[test]
    fn test_session_attributes_only_when_continuing() {
        let reply = Response::continuing().finish().render(&attrs());
        assert_eq!(reply.session_attributes, Some(attrs()));

        let reply = Response::new().finish().render(&attrs());
        assert!(reply.session_attributes.is_none());

        let reply = Response::continuing().finish().render(&Map::new());
        assert!(reply.session_attributes.is_none());
    }

    #[test]
    fn test_card_variants() {
        let mut standard = Response::new();
        standard.image_card("Docs", "Chart", "https://img.example.com/chart.png");
        standard.link_account = true;
        match standard.finish().render(&Map::new()).response.card {
            Some(Card::Standard { title, text, image }) => {
                assert_eq!(title, "Docs");
                assert_eq!(text.as_deref(), Some("Chart"));
                assert_eq!(image.small_image_url, image.large_image_url);
            }
            other => panic!("expected Standard card, got {:?}", other),
        }

        let mut link = Response::new();
        link.link_account_card("Docs - Account Setup");
        link.card_content = Some("ignored".into());
        assert_eq!(
            link.finish().render(&Map::new()).response.card,
            Some(Card::LinkAccount {
                title: "Docs - Account Setup".into()
            })
        );

        let mut simple = Response::new();
        simple.simple_card("Docs", "I have stored that your heart rate is 72");
        assert_eq!(
            simple.finish().render(&Map::new()).response.card,
            Some(Card::Simple {
                title: "Docs".into(),
                content: Some("I have stored that your heart rate is 72".into())
            })
        );
    }

    #[test]
    fn test_wire_format() {
        let mut response = Response::new();
        response.speech_text = "Hello".into();
        response.link_account_card("Setup");

        let value = serde_json::to_value(response.finish().render(&Map::new())).unwrap();
        assert_eq!(
            value,
            json!({
                "version": "1.0",
                "response": {
                    "outputSpeech": { "type": "SSML", "ssml": "<speak>Hello</speak>" },
                    "shouldEndSession": true,
                    "card": { "type": "LinkAccount", "title": "Setup" }
                }
            })
        );
    }

    #[test]
    fn test_fail_returns_handler_error() {
        let err = Response::new().fail("no identity");
        assert!(matches!(err, SkillError::Handler(ref m) if m == "no identity"));
    }
}
