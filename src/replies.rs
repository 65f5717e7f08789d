// src/replies.rs
//! Fixed texts: the business profile handed to the upstream model and every
//! canned reply the relay can send back to a visitor.

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant for Ayuluxir Wellness Clinic. \
Ayuluxir offers holistic wellness and Ayurveda-inspired treatments in Birmingham, UK (Wylde Green, B23 5TN). \
Services include: signature massage, Nasya therapy, Indian head massage, deep tissue massage, lymphatic drainage, \
reflexology, facials (signature, pigmentation, hydration), wellness packages (signature wellness, purity detox, \
antioxidant therapy, immune booster, vitamin booster). They often have offers (e.g. 20% off). \
Contact: phone +44 7345 409977, email info@ayuluxir.co.uk, WhatsApp for bookings. \
Be warm, concise, and encourage bookings or enquiries. If unsure, suggest they call or WhatsApp.";

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

pub const INVALID_REQUEST: &str = "Invalid request";

pub const EMPTY_MESSAGE: &str = "Please type a message.";

/// Sent when no upstream credential is configured.
pub const STATIC_FALLBACK: &str = "Thanks for your message! For bookings and questions, the quickest way to reach us \
is WhatsApp (+44 7345 409977) or call. You can also email info@ayuluxir.co.uk. \
We'd love to help you with our wellness services.";

/// Upstream answered with a non-success status.
pub const UPSTREAM_HICCUP: &str =
    "We're having a small hiccup. Please WhatsApp us at +44 7345 409977 or call\u{2014}we'd love to help!";

/// Upstream could not be reached or sent something unreadable.
pub const UPSTREAM_FAILURE: &str = "Something went wrong on our side. Please WhatsApp +44 7345 409977 \
or email info@ayuluxir.co.uk\u{2014}we're here to help!";

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: &str = "+44 7345 409977";

    #[test]
    fn every_visitor_fallback_names_the_phone_number() {
        for text in [STATIC_FALLBACK, UPSTREAM_HICCUP, UPSTREAM_FAILURE, SYSTEM_PROMPT] {
            assert!(text.contains(PHONE), "missing phone in: {text}");
        }
    }

    #[test]
    fn line_continuations_keep_single_spaces() {
        assert!(!SYSTEM_PROMPT.contains("  "));
        assert!(!STATIC_FALLBACK.contains("  "));
        assert!(!UPSTREAM_FAILURE.contains("  "));
    }
}
