//! Storing measurements and mailing the report

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::SkillResult;
use crate::gateway::{report, HealthRecord, OutboundEmail};
use crate::intents::IntentHandler;
use crate::skill::{FinalResponse, Response, ResponseOptions, TurnContext};

use super::account::{link_account, linked_token};
use super::intent::BuiltinIntent;
use super::messages;

pub const PARAMETER_SLOT: &str = "Parameter";
pub const VALUE_SLOT: &str = "value";
pub const UNIT_SLOT: &str = "unit";

/// "record that my heart rate is 72"
pub struct DataRecordHandler;

#[async_trait]
impl IntentHandler for DataRecordHandler {
    fn name(&self) -> &str {
        BuiltinIntent::DataRecord.as_str()
    }

    async fn handle(
        &self,
        turn: &mut TurnContext<'_>,
        mut response: Response,
    ) -> SkillResult<FinalResponse> {
        let Some(token) = linked_token(turn) else {
            return Ok(link_account(response));
        };

        let Some(parameter) = turn.slots.filled(PARAMETER_SLOT).map(str::to_owned) else {
            return Ok(response.done(
                ResponseOptions::new()
                    .speech(messages::MISSING_PARAMETER)
                    .reprompt(messages::RECORD_REPROMPT)
                    .end_session(false),
            ));
        };
        let Some(mut value) = turn.slots.filled(VALUE_SLOT).map(str::to_owned) else {
            return Ok(response.done(
                ResponseOptions::new()
                    .speech(messages::MISSING_VALUE)
                    .reprompt(messages::RECORD_REPROMPT)
                    .end_session(false),
            ));
        };
        if let Some(unit) = turn.slots.filled(UNIT_SLOT) {
            value = format!("{} {}", value, unit);
        }

        let identity = turn.resolve_identity(&token).await?;

        let timestamp = turn.request.timestamp.clone();
        let record = HealthRecord::new(
            &identity.email,
            &parameter,
            &value,
            record_date(&timestamp),
            timestamp,
        );

        let options = match turn.services.data.insert_record(&record).await {
            Ok(()) => {
                tracing::info!("Stored {} for {}", parameter, identity.email);
                let text = messages::stored(&parameter, &value);
                response.simple_card(messages::CARD_TITLE, text.clone());
                ResponseOptions::new().speech(text)
            }
            Err(err) => {
                tracing::error!("Failed to store record {}: {}", record.id, err);
                ResponseOptions::new().speech(messages::GENERIC_ERROR)
            }
        };

        Ok(response.done(options.end_session(true)))
    }
}

/// UTC calendar date of the request, falling back to today
fn record_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
        .format("%Y-%m-%d")
        .to_string()
}

/// "send my reports to the doctor"
pub struct DataRetrieveHandler;

#[async_trait]
impl IntentHandler for DataRetrieveHandler {
    fn name(&self) -> &str {
        BuiltinIntent::DataRetrieve.as_str()
    }

    async fn handle(
        &self,
        turn: &mut TurnContext<'_>,
        response: Response,
    ) -> SkillResult<FinalResponse> {
        let Some(token) = linked_token(turn) else {
            return Ok(link_account(response));
        };

        let identity = turn.resolve_identity(&token).await?;
        let services = turn.services;

        let entries = match services.data.query_records(&identity.email).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!("Failed to query records for {}: {}", identity.email, err);
                return Ok(response.done(
                    ResponseOptions::new()
                        .speech(messages::GENERIC_ERROR)
                        .end_session(true),
                ));
            }
        };
        tracing::debug!("{} records for {}", entries.len(), identity.email);

        let report = OutboundEmail::new(
            &identity.profile,
            report::report_subject(&identity.name),
            report::render_report(&identity.name, &identity.email, &entries),
        );

        let speech = match services.mailer.send(&report).await {
            Ok(()) => {
                tracing::info!("Report sent to {}", identity.profile);
                messages::REPORT_SENT
            }
            Err(err) => {
                tracing::error!("Failed to send report to doctor: {}", err);
                let notice = OutboundEmail::new(
                    &identity.email,
                    report::UPDATE_NOTICE_SUBJECT,
                    report::render_update_notice(&identity.name),
                );
                if let Err(err) = services.mailer.send(&notice).await {
                    tracing::error!("Failed to send update notice: {}", err);
                }
                messages::DOCTOR_EMAIL_MISSING
            }
        };

        Ok(response.done(ResponseOptions::new().speech(speech).end_session(true)))
    }
}
