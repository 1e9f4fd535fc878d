//! Turning the sheets' loose link columns into absolute URLs.
//!
//! Cells hold anything from full URLs to bare domains, `@handles`, or a `-`
//! meaning "none". Every helper returns `None` for those empty markers.

fn meaningful(raw: &str) -> Option<&str> {
    match raw.trim() {
        "" | "-" => None,
        value => Some(value),
    }
}

/// Absolute URL for a website cell; `https://` is added unless the value
/// already starts with `http`.
pub fn normalize_link(raw: &str) -> Option<String> {
    let link = meaningful(raw)?;
    if link.starts_with("http") {
        Some(link.to_string())
    } else {
        Some(format!("https://{}", link))
    }
}

/// Absolute URL for a social cell. Bare handles are X accounts.
pub fn normalize_social_link(raw: &str) -> Option<String> {
    let social = meaningful(raw)?;
    if social.starts_with("http") {
        return Some(social.to_string());
    }
    if social.starts_with("warpcast.com") {
        return Some(format!("https://{}", social));
    }
    Some(format!("https://x.com/{}", social.replace('@', "")))
}

/// Absolute URL for a chat cell (Telegram or Discord handles, or links).
pub fn normalize_chat_link(raw: &str) -> Option<String> {
    let chat = meaningful(raw)?;
    if chat.starts_with("http") {
        return Some(chat.to_string());
    }
    if chat.contains("t.me") || chat.contains("telegram") {
        return Some(if chat.starts_with("t.me") {
            format!("https://{}", chat)
        } else {
            format!("https://t.me/{}", chat)
        });
    }
    if chat.contains("discord") {
        return Some(if chat.starts_with("discord") {
            format!("https://{}", chat)
        } else {
            format!("https://discord.gg/{}", chat)
        });
    }
    Some(format!("https://{}", chat))
}
