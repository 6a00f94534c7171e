use serde::Deserialize;

/// Duration in a human-readable form, e.g. `2m 30s` or `1500ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let mut out = std::time::Duration::default();
        for part in raw.split_whitespace() {
            let unit_start = part
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(part.len());
            let (value, unit) = part.split_at(unit_start);
            let value = value
                .parse::<u64>()
                .map_err(|_| serde::de::Error::custom("Invalid duration"))?;
            out += match unit {
                "ms" => std::time::Duration::from_millis(value),
                "s" => std::time::Duration::from_secs(value),
                "m" => std::time::Duration::from_secs(value * 60),
                "h" => std::time::Duration::from_secs(value * 60 * 60),
                "d" => std::time::Duration::from_secs(value * 24 * 60 * 60),
                _ => return Err(serde::de::Error::custom("Invalid duration")),
            };
        }
        Ok(Self(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("1500ms", Some(1500)),
            ("13s", Some(13_000)),
            ("42m", Some(42 * 60 * 1000)),
            ("7h", Some(7 * 60 * 60 * 1000)),
            ("20d", Some(20 * 24 * 60 * 60 * 1000)),
            ("", Some(0)),
            ("1d 2h 3m 4s", Some((((24 + 2) * 60 + 3) * 60 + 4) * 1000)),
            ("2s 500ms", Some(2500)),
            ("xyz", None),
            ("7dd", None),
            ("s", None),
        ] {
            let input = serde_json::Value::String(input.into());
            let output = serde_json::from_value::<Duration>(input)
                .ok()
                .map(|duration| duration.0.as_millis());
            assert_eq!(output, expected);
        }
    }
}
