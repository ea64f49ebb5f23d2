use crate::view::{Card, View};

const READ_MORE: &str = "Read more →";

/// Plain-text rendering for the terminal.
pub fn text(view: &View) -> String {
    match view {
        View::Idle => String::new(),
        View::Loading => "Loading...\n".to_string(),
        View::Failure { message, can_retry } => {
            let mut out = format!("Error: {}\n", message);
            if *can_retry {
                out.push_str("[:retry] Try again\n");
            }
            out
        }
        View::NotFound { keyword, language } => {
            format!("No news found for \"{}\" in language {}.\n", keyword, language.code())
        }
        View::Results(cards) => cards.iter().map(text_card).collect::<Vec<_>>().join("\n"),
    }
}

fn text_card(card: &Card) -> String {
    format!(
        "## {}\n{}\n{} {}\n",
        card.title, card.description, READ_MORE, card.url
    )
}

/// HTML fragment; links open in a new browsing context without opener access.
pub fn html(view: &View) -> String {
    match view {
        View::Idle => String::new(),
        View::Loading => "<div class=\"loading\">Loading...</div>\n".to_string(),
        View::Failure { message, can_retry } => {
            let button = if *can_retry {
                "<button class=\"retry\">Try again</button>"
            } else {
                ""
            };
            format!(
                "<div class=\"error\">Error: {}{}</div>\n",
                xml_escape(message),
                button
            )
        }
        View::NotFound { keyword, language } => format!(
            "<div class=\"no-results\">No news found for \"{}\" in language {}.</div>\n",
            xml_escape(keyword),
            language.code()
        ),
        View::Results(cards) => {
            let mut out = String::from("<div class=\"news-grid\">\n");
            for card in cards {
                out.push_str(&html_card(card));
            }
            out.push_str("</div>\n");
            out
        }
    }
}

fn html_card(card: &Card) -> String {
    format!(
        concat!(
            "  <div class=\"news-card\">\n",
            "    <h3>{}</h3>\n",
            "    <p>{}</p>\n",
            "    <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"read-more\">{}</a>\n",
            "  </div>\n"
        ),
        xml_escape(&card.title),
        xml_escape(&card.description),
        xml_escape(&card.url),
        READ_MORE
    )
}

fn xml_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
