//! Spoken text and card titles

pub const CARD_TITLE: &str = "Docs";
pub const ACCOUNT_SETUP_TITLE: &str = "Docs - Account Setup";

pub const WELCOME: &str = "Welcome to Docs skill. Using this skill you can store your health parameters easily. You can say, record that my heart beat is 72";
pub const WELCOME_REPROMPT: &str =
    "What you want to do? You can say, store my heart beat is 72 or send records to my doctor";

pub const NOT_LOGGED_IN: &str = "You are not logged in. You need to login from Alexa app. Please see Alexa app for more information.";

pub const MISSING_PARAMETER: &str = "Looks like you forgot to mention Health parameter. you can say, my heart rate is 72. ";
pub const MISSING_VALUE: &str = "Looks like you forgot to mention Value of health parameter. for example, you can say, my heart rate is 72. ";
pub const RECORD_REPROMPT: &str = "you can store a health record or send reports to your doctor. To send reports say, send my reports to the doctor.";

pub const GENERIC_ERROR: &str = "There is some error";

pub const REPORT_SENT: &str = "Email sent successfully";
pub const DOCTOR_EMAIL_MISSING: &str = "looks like you have not updated your doctors email. Our Developers will contact you within 24 hours to resolve it, See Ya!";

pub const NO_DOCTOR_EMAIL: &str = "<say-as interpret-as='interjection'>uh oh.</say-as> looks like there is no doctors email address. To add one in your account, you can simply ask me to update the doctors email.";
pub const NO_DOCTOR_EMAIL_REPROMPT: &str = "Doctors email address is the address where I'll share your health report. To update it say, Alexa, I want to update my doctors email. ";

pub const UPDATE_NOTICE_FAILED: &str =
    "There is some error in sending email! Our developers will contact you soon to resolve it.";
pub const UPDATE_ACK_EN_IN: &str = "<say-as interpret-as='interjection'>okey dokey</say-as><break strength='x-strong'/>Our Developers will contact you soon to update it, See Ya!";
pub const UPDATE_ACK_EN_US: &str = "<say-as interpret-as='interjection'>all righty</say-as><break time='0.5s'/>Our Developers will contact you soon to update it, See Ya!";
pub const UPDATE_ACK: &str = "Okay! Our Developers will contact you soon to update it, See Ya!";

pub const GOOD_BYE: &str = "Good Bye. ";
pub const CANCELLED: &str = "OK, Good Bye. ";
pub const HELP: &str = "you can store a health record or send reports to your doctor. you can store records by saying, my heart rate is 72. and to send report, you can say send my reports to my doctor.";
pub const HELP_REPROMPT: &str =
    "you can say my heart rate is 72 and I will store this information for future records.";

pub fn stored(parameter: &str, value: &str) -> String {
    format!("I have stored that your {} is {}", parameter, value)
}

pub fn doctor_email(address: &str) -> String {
    format!(
        "Your doctors email address is {}. You can always update it by saying, Alexa, tell Docs that I want to update my doctors email.",
        address
    )
}

/// Acknowledgement for an update request, by locale
pub fn update_ack(locale: Option<&str>) -> &'static str {
    match locale {
        Some("en-IN") => UPDATE_ACK_EN_IN,
        Some("en-US") => UPDATE_ACK_EN_US,
        _ => UPDATE_ACK,
    }
}
