use chrono_tz::Tz;
use log::warn;

use crate::models::{Fight, FightDocument};
use crate::voting::{self, Comparison, Tally};

const TIE_LINE: &str = "It’s a tie. Humanity is doomed.";
const NO_ACTIVE_FIGHT: &str = "No fight running. Summon Moldy.";
const NO_HISTORY: &str = "No previous fights yet.";
const REPO_URL: &str = "https://github.com/karmolty/food-fight";
const REPO_NAME: &str = "karmolty/food-fight";

pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn winner_line(comparison: &Comparison) -> Option<String> {
    match comparison {
        Comparison::Empty => None,
        Comparison::Tie => Some(TIE_LINE.to_string()),
        Comparison::Winner { label, .. } => Some(format!("{} wins.", label)),
    }
}

// Formats like "1/2/2025, 7:04:05 PM". A timestamp that does not parse is
// shown as stored.
pub fn format_created_at(fight: &Fight, tz: &Tz) -> String {
    match fight.created_at_utc() {
        Some(utc) => utc
            .with_timezone(tz)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string(),
        None => {
            if !fight.created_at.is_empty() {
                warn!("Fight {} has an unreadable timestamp: {}", fight.id, fight.created_at);
            }
            fight.created_at.clone()
        }
    }
}

fn label_or_unknown(label: &str) -> String {
    if label.is_empty() {
        "?".to_string()
    } else {
        escape_html(label)
    }
}

pub fn render_fight_card(fight: &Fight, title_prefix: &str, tz: &Tz) -> String {
    let tally = voting::tally(Some(fight));
    let comparison = voting::compare(&tally);
    let Tally { a, b, count_a, count_b, total } = tally;
    let a = label_or_unknown(&a);
    let b = label_or_unknown(&b);
    let when = format_created_at(fight, tz);

    let winner = winner_line(&comparison)
        .map(|line| format!("<div class=\"winner\">{}</div>", escape_html(&line)))
        .unwrap_or_default();

    format!(
        r#"
  <section class="fight">
    <div class="row">
      <div class="foods">{a}&nbsp;vs&nbsp;{b}</div>
      <div class="meta">{prefix}{when}</div>
    </div>
    <div class="row score">
      <div>{a} <strong>{count_a}</strong></div>
      <div>{b} <strong>{count_b}</strong></div>
      <div class="total">{total} votes</div>
    </div>
    {winner}
  </section>"#,
        prefix = escape_html(title_prefix),
        when = escape_html(&when),
    )
}

/// Render the full static page: the running fight on top, then every
/// archived fight with the most recent first.
pub fn render_page(document: &FightDocument, tz: &Tz) -> String {
    let active_card = match document.active() {
        Some(fight) => render_fight_card(fight, "Active • ", tz),
        None => format!("<p class=\"muted\">{}</p>", NO_ACTIVE_FIGHT),
    };

    let history_cards = if document.history.is_empty() {
        format!("<p class=\"muted\">{}</p>", NO_HISTORY)
    } else {
        document
            .history
            .iter()
            .rev()
            .map(|fight| render_fight_card(fight, "Previous • ", tz))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Food Fight</title>
  <style>
    :root {{ --bg:#ffffff; --ink:#111; --muted:#666; --line:#eee; }}
    body {{ margin:0; font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial; background:var(--bg); color:var(--ink); }}
    .wrap {{ max-width: 720px; margin: 0 auto; padding: 28px 18px 44px; }}
    h1 {{ margin: 0 0 6px; font-size: 28px; font-weight: 700; letter-spacing: -0.02em; }}
    h2 {{ font-size:12px; font-weight:700; letter-spacing:.08em; text-transform:uppercase; }}
    .sub {{ margin: 0 0 22px; color: var(--muted); }}
    .muted {{ color: var(--muted); }}
    .fight {{ border-top: 1px solid var(--line); padding: 16px 0; }}
    .row {{ display:flex; gap: 12px; align-items: baseline; justify-content: space-between; flex-wrap: wrap; }}
    .foods {{ font-size: 40px; letter-spacing: 0.02em; }}
    .meta {{ color: var(--muted); font-size: 12px; }}
    .score {{ margin-top: 10px; font-size: 16px; }}
    .score strong {{ font-size: 20px; }}
    .total {{ color: var(--muted); }}
    .winner {{ margin-top: 10px; font-weight: 700; }}
    footer {{ margin-top: 26px; border-top: 1px solid var(--line); padding-top: 14px; color: var(--muted); font-size: 12px; }}
    a {{ color: inherit; }}
  </style>
</head>
<body>
  <div class="wrap">
    <h1>Food Fight</h1>
    <p class="sub">Vote in Discord. The site updates as votes come in.</p>

    <h2 class="muted">Current fight</h2>
    {active_card}

    <h2 class="muted" style="margin-top:22px;">History</h2>
    {history_cards}

    <footer>
      <div>Repo: <a href="{repo_url}" target="_blank" rel="noreferrer">{repo_name}</a></div>
    </footer>
  </div>
</body>
</html>
"#,
        repo_url = REPO_URL,
        repo_name = REPO_NAME,
    )
}

// Plain-text view of the running fight for the terminal
pub fn render_status(document: &FightDocument, tz: &Tz) -> String {
    let Some(fight) = document.active() else {
        return format!("{}\n{} previous fight(s)\n", NO_ACTIVE_FIGHT, document.history.len());
    };

    let tally = voting::tally(Some(fight));
    let mut out = format!(
        "{} vs {} (started {})\n{}: {}\n{}: {}\n{} votes\n",
        tally.a,
        tally.b,
        format_created_at(fight, tz),
        tally.a,
        tally.count_a,
        tally.b,
        tally.count_b,
        tally.total,
    );
    if let Some(line) = winner_line(&voting::compare(&tally)) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!("{} previous fight(s)\n", document.history.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> Tz {
        chrono_tz::UTC
    }

    fn fight(foods: [&str; 2], created_at: &str, votes: &[(&str, &str)]) -> Fight {
        Fight {
            id: "f".to_string(),
            created_at: created_at.to_string(),
            foods: foods.map(str::to_string),
            votes: votes
                .iter()
                .map(|(voter, choice)| (voter.to_string(), choice.to_string()))
                .collect(),
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("🍕"), "🍕");
    }

    #[test]
    fn winner_lines() {
        assert_eq!(winner_line(&Comparison::Empty), None);
        assert_eq!(winner_line(&Comparison::Tie).as_deref(), Some(TIE_LINE));
        let winner = Comparison::Winner {
            label: "🍕".to_string(),
            winning_count: 2,
            losing_label: "🌮".to_string(),
            losing_count: 1,
        };
        assert_eq!(winner_line(&winner).as_deref(), Some("🍕 wins."));
    }

    #[test]
    fn formats_timestamp_in_timezone() {
        let f = fight(["🍕", "🌮"], "2025-01-02T03:04:05.678Z", &[]);
        let pacific = chrono_tz::America::Los_Angeles;
        assert_eq!(format_created_at(&f, &pacific), "1/1/2025, 7:04:05 PM");
    }

    #[test]
    fn summer_timestamp_uses_daylight_time() {
        let f = fight(["🍕", "🌮"], "2025-07-01T19:00:00Z", &[]);
        let pacific = chrono_tz::America::Los_Angeles;
        assert_eq!(format_created_at(&f, &pacific), "7/1/2025, 12:00:00 PM");
    }

    #[test]
    fn bad_timestamp_falls_back_to_raw() {
        let f = fight(["🍕", "🌮"], "sometime last week", &[]);
        assert_eq!(format_created_at(&f, &utc()), "sometime last week");
    }

    #[test]
    fn card_escapes_labels() {
        let f = fight(["<script>", "🌮"], "2025-01-02T03:04:05Z", &[("u1", "<script>")]);
        let card = render_fight_card(&f, "Active • ", &utc());

        assert!(!card.contains("<script>"));
        assert!(card.contains("&lt;script&gt;&nbsp;vs&nbsp;🌮"));
        assert!(card.contains("<strong>1</strong>"));
        assert!(card.contains("1 votes"));
        assert!(card.contains("&lt;script&gt; wins."));
    }

    #[test]
    fn page_lists_history_newest_first() {
        let document = FightDocument {
            active: None,
            history: vec![
                fight(["🍎", "🍌"], "2025-01-01T00:00:00Z", &[]),
                fight(["🍣", "🍜"], "2025-02-01T00:00:00Z", &[("u1", "🍣")]),
            ],
        };
        let page = render_page(&document, &utc());

        assert!(page.contains(NO_ACTIVE_FIGHT));
        assert!(!page.contains(NO_HISTORY));
        let newer = page.find("🍣&nbsp;vs").unwrap();
        let older = page.find("🍎&nbsp;vs").unwrap();
        assert!(newer < older);
        assert!(page.contains(TIE_LINE));
    }

    #[test]
    fn empty_page_has_placeholders() {
        let page = render_page(&FightDocument::new(), &utc());
        assert!(page.contains(NO_ACTIVE_FIGHT));
        assert!(page.contains(NO_HISTORY));
        assert!(page.contains(r#"<a href="https://github.com/karmolty/food-fight""#));
    }

    #[test]
    fn status_without_fight() {
        let document = FightDocument {
            active: None,
            history: vec![fight(["🍎", "🍌"], "2025-01-01T00:00:00Z", &[])],
        };
        assert_eq!(
            render_status(&document, &utc()),
            format!("{}\n1 previous fight(s)\n", NO_ACTIVE_FIGHT)
        );
    }

    #[test]
    fn status_summarises_active_fight() {
        let document = FightDocument {
            active: Some(fight(
                ["🍕", "🌮"],
                "2025-01-02T03:04:05Z",
                &[("u1", "🍕"), ("u2", "🌮"), ("u3", "🍕")],
            )),
            history: vec![],
        };
        let status = render_status(&document, &utc());
        assert!(status.starts_with("🍕 vs 🌮 (started 1/2/2025, 3:04:05 AM)\n"));
        assert!(status.contains("🍕: 2\n🌮: 1\n3 votes\n🍕 wins.\n"));
        assert!(status.ends_with("0 previous fight(s)\n"));
    }
}
