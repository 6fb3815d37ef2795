use rail_core::Chips;
use rail_gameroom::Advice;

/// Funnels raw model output into [`Advice`].
///
/// Tries the closed JSON schema first, then a tolerant text form
/// (`"raise 40"`, `"call"`, `"all in"`); anything else is None and the
/// caller substitutes the engine's passive default. Amounts are parsed
/// but never trusted; legality is re-checked downstream against the
/// live hand either way.
pub fn parse_advice(raw: &str) -> Option<Advice> {
    let trimmed = raw.trim();
    parse_json(trimmed).or_else(|| parse_text(trimmed))
}

fn parse_json(raw: &str) -> Option<Advice> {
    // Models love to wrap JSON in fences; strip one layer if present.
    let raw = raw
        .strip_prefix("```json")
        .or_else(|| raw.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(raw)
        .trim();
    serde_json::from_str::<Advice>(raw).ok()
}

fn parse_text(raw: &str) -> Option<Advice> {
    let lowered = raw.to_lowercase();
    let mut words = lowered.split_whitespace();
    let verb = words.next()?;
    let amount = words.find_map(|w| w.parse::<Chips>().ok());
    let action = match verb {
        "fold" => "FOLD",
        "check" => "CHECK",
        "call" => "CALL",
        "bet" => "BET",
        "raise" => "RAISE",
        "shove" | "jam" => "ALL_IN",
        "all" if lowered.contains("all in") || lowered.contains("all-in") => "ALL_IN",
        "all-in" | "allin" => "ALL_IN",
        _ => return None,
    };
    Some(Advice {
        action: action.to_string(),
        amount,
        reasoning: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_closed_json() {
        let advice =
            parse_advice(r#"{"action":"RAISE","amount":40,"reasoning":"value"}"#).unwrap();
        assert_eq!(advice.action, "RAISE");
        assert_eq!(advice.amount, Some(40));
        assert_eq!(advice.reasoning.as_deref(), Some("value"));
    }

    #[test]
    fn parses_fenced_json() {
        let advice = parse_advice("```json\n{\"action\":\"CALL\"}\n```").unwrap();
        assert_eq!(advice.action, "CALL");
    }

    #[test]
    fn parses_plain_text() {
        assert_eq!(parse_advice("raise 40").unwrap().amount, Some(40));
        assert_eq!(parse_advice("CHECK").unwrap().action, "CHECK");
        assert_eq!(parse_advice("all in").unwrap().action, "ALL_IN");
        assert_eq!(parse_advice("jam").unwrap().action, "ALL_IN");
    }

    #[test]
    fn garbage_is_none() {
        assert!(parse_advice("").is_none());
        assert!(parse_advice("I think poker is hard").is_none());
        assert!(parse_advice("{\"verb\":\"raise\"}").is_none());
    }
}
