//! Links derived from a public profile: share URL, WhatsApp share, maps, phone.

use url::Url;

/// Builds the public share URL `<base>/<slug>`.
pub fn public_url(base_url: &str, slug: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), slug)
}

/// Text used when sharing a profile.
pub fn share_text(name: &str, public_url: &str) -> String {
    format!("Check out {name} – menu, hours, and more: {public_url}")
}

/// WhatsApp share link carrying [`share_text`].
pub fn whatsapp_share_url(name: &str, public_url: &str) -> Option<String> {
    Url::parse_with_params("https://wa.me/", &[("text", share_text(name, public_url))])
        .ok()
        .map(String::from)
}

/// Google Maps search link for an address.
pub fn maps_url(address: &str) -> Option<String> {
    Url::parse_with_params("https://maps.google.com/", &[("q", address)])
        .ok()
        .map(String::from)
}

/// `tel:` link for a phone number, keeping only dialable characters.
pub fn tel_href(phone: &str) -> String {
    let digits: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{digits}")
}
