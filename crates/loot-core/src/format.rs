//! Message formatting helpers: rarity colors, placeholder expansion,
//! and display-name derivation.
//!
//! Pure functions over reward data and a theme of legacy `&x` color
//! codes. No shared state; presentation layers decide what to do with
//! the rendered strings.

use crate::reward::{Actor, Rarity, Reward};

/// Legacy color code for a rarity tier.
pub fn rarity_color(rarity: Rarity) -> &'static str {
    match rarity {
        Rarity::Legendary | Rarity::Masked => "&6",
        Rarity::Epic => "&5",
        Rarity::Rare => "&3",
        Rarity::Uncommon => "&a",
        Rarity::Common => "&7",
    }
}

/// Rarity name prefixed with its color code.
pub fn format_rarity(rarity: Rarity) -> String {
    format!("{}{}", rarity_color(rarity), rarity.name())
}

/// The name a reward shows in messages: its display name when set,
/// otherwise the material token title-cased ("ELDER_GUARDIAN_HEAD"
/// becomes "Elder Guardian Head").
pub fn display_item_name(reward: &Reward) -> String {
    if !reward.payload.display_name.is_empty() {
        return reward.payload.display_name.clone();
    }
    if !reward.payload.material.is_empty() {
        return title_case_token(&reward.payload.material);
    }
    "Unknown Item".to_string()
}

/// Expands `{player}`, `{item}`, `{rarity}`, `{rarity_color}` and
/// `{id}` in a message template.
pub fn expand_placeholders(template: &str, actor: &Actor, reward: &Reward) -> String {
    template
        .replace("{player}", &actor.name)
        .replace("{item}", &display_item_name(reward))
        .replace("{rarity}", reward.rarity.name())
        .replace("{rarity_color}", rarity_color(reward.rarity))
        .replace("{id}", &reward.id)
}

/// Removes `&x` color codes, e.g. for plain-text logs.
pub fn strip_color(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '&' {
            if chars.next().is_none() {
                out.push(c);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn title_case_token(token: &str) -> String {
    token
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
