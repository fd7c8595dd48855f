// src/extractors/snippet.rs
//! Career-table rows of a boxer's page, one [`FightSnippet`] per listed bout.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::fragment::{child_elements, element_sibling, id_from_href, parent_element, selector, text_of, Side};
use super::profile::{page_boxer_id, page_boxer_name};
use super::text::to_number;
use super::DocumentExtractor;
use crate::records::{FightSnippet, FightSnippetBuilder};
use crate::utils::error::ExtractError;

const SNIPPET_DATE_FORMAT: &str = "%Y-%m-%d";
/// Column of the page boxer's own weigh-in weight.
const WEIGHIN_CELL_INDEX: usize = 2;
/// Result cell to result-type cell.
const RESULT_TYPE_HOPS: usize = 1;
/// Result cell to `"<completed>/<scheduled>"` rounds cell.
const ROUNDS_HOPS: usize = 2;
/// Opponent cell to opponent weigh-in cell.
const OPPONENT_WEIGHT_HOPS: usize = 1;

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("tr.drawRowBorder"));
static DATE_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(r#"a[href*="date"]"#));
static BOXER_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(r#"a[href*="proboxer"]"#));
static EVENT_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(r#"a[href*="event"]"#));
static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("div.boutResult"));

fn weight(cell: ElementRef) -> Option<f64> {
    to_number(&text_of(cell)).value()
}

fn add_fight_id(row: ElementRef, builder: &mut FightSnippetBuilder) {
    if let Some(id) = row.value().attr("id").and_then(|id| id.trim().parse::<u64>().ok()) {
        builder.fsnip_fight_id(id);
    }
}

fn add_fight_date(row: ElementRef, builder: &mut FightSnippetBuilder) {
    let Some(link) = row.select(&DATE_LINK_SELECTOR).last() else {
        return;
    };
    if let Ok(date) = NaiveDate::parse_from_str(&text_of(link), SNIPPET_DATE_FORMAT) {
        builder.fsnip_fight_date(date);
    }
}

fn add_boxer_weight(row: ElementRef, builder: &mut FightSnippetBuilder) {
    if let Some(w) = child_elements(row).get(WEIGHIN_CELL_INDEX).and_then(|cell| weight(*cell)) {
        builder.fsnip_boxer_weighin_weight(w);
    }
}

/// Opponent name, id and weigh-in from the last boxer link in the row.
fn add_opponent(row: ElementRef, builder: &mut FightSnippetBuilder) {
    let Some(link) = row.select(&BOXER_LINK_SELECTOR).last() else {
        return;
    };
    builder.fsnip_opp_name(text_of(link));
    if let Some(id) = link.value().attr("href").and_then(id_from_href) {
        builder.fsnip_br_opp_id(id);
    }
    let opp_weight = parent_element(link)
        .and_then(|cell| element_sibling(cell, Side::Right, OPPONENT_WEIGHT_HOPS))
        .and_then(weight);
    if let Some(w) = opp_weight {
        builder.fsnip_opp_weighin_weight(w);
    }
}

/// Result, result type and rounds, all positioned off the result cell.
fn add_result(row: ElementRef, builder: &mut FightSnippetBuilder) {
    let Some(result) = row.select(&RESULT_SELECTOR).next() else {
        return;
    };
    builder.fsnip_fight_result(text_of(result));

    let Some(cell) = parent_element(result) else {
        return;
    };
    if let Some(kind) = element_sibling(cell, Side::Right, RESULT_TYPE_HOPS) {
        builder.fsnip_fight_result_type(text_of(kind));
    }
    if let Some(rounds) = element_sibling(cell, Side::Right, ROUNDS_HOPS).map(text_of) {
        let mut parts = rounds.split('/');
        if let Some(Ok(n)) = parts.next().map(|p| p.trim().parse::<u32>()) {
            builder.fsnip_fight_rounds_completed(n);
        }
        if let Some(Ok(n)) = parts.next().map(|p| p.trim().parse::<u32>()) {
            builder.fsnip_fight_rounds_scheduled(n);
        }
    }
}

/// `"<event>/<fight>"` from the last event link.
fn add_event_fight_id(row: ElementRef, builder: &mut FightSnippetBuilder) {
    let key = row
        .select(&EVENT_LINK_SELECTOR)
        .last()
        .and_then(|link| link.value().attr("href"))
        .and_then(|href| href.split_once("event/"))
        .map(|(_, rest)| rest.trim().to_string());
    if let Some(key) = key {
        builder.fsnip_event_fight_id(key);
    }
}

fn extract_snippet(row: ElementRef, boxer_name: &str, boxer_id: u64) -> FightSnippet {
    let mut builder = FightSnippetBuilder::new();
    add_fight_id(row, &mut builder);
    add_fight_date(row, &mut builder);
    add_boxer_weight(row, &mut builder);
    add_opponent(row, &mut builder);
    add_result(row, &mut builder);
    add_event_fight_id(row, &mut builder);
    builder.boxer_name(boxer_name).br_boxer_id(boxer_id);
    builder.build()
}

/// Extracts the career table of a boxer page.
#[derive(Debug, Default, Clone)]
pub struct CareerExtractor;

impl CareerExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Every listed bout in page order, each stamped with the page's boxer.
    ///
    /// A page without career rows yields an empty list; only a missing boxer
    /// name heading fails the page.
    pub fn extract_snippets(&self, boxer_key: &str, html: &str) -> Result<Vec<FightSnippet>, ExtractError> {
        let document = Html::parse_document(html);
        let boxer_name = page_boxer_name(&document).ok_or_else(|| {
            ExtractError::MissingAnchor(format!("boxer name heading on career page {}", boxer_key))
        })?;
        let boxer_id = page_boxer_id(&document).unwrap_or_default();

        let snippets: Vec<FightSnippet> = document
            .select(&ROW_SELECTOR)
            .map(|row| extract_snippet(row, &boxer_name, boxer_id))
            .collect();
        tracing::debug!("Career page {} listed {} bouts", boxer_key, snippets.len());
        Ok(snippets)
    }
}

impl DocumentExtractor for CareerExtractor {
    type Output = Vec<FightSnippet>;

    fn kind(&self) -> &'static str {
        "career"
    }

    fn extract(&self, key: &str, html: &str) -> Result<Vec<FightSnippet>, ExtractError> {
        self.extract_snippets(key, html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAREER_PAGE: &str = r#"<html><body>
<h1 style="display:inline-block;margin-right:10px;line-height:30px;">Andy Ruiz Jr</h1>
<h2 style="display:inline-block;line-height:100%;padding:0;margin:0;">ID# 389442</h2>
<table class="dataTable">
  <thead><tr><th>date</th><th></th><th>lbs</th><th>opponent</th><th>lbs</th></tr></thead>
  <tbody>
  <tr class="drawRowBorder" id="2822374">
    <td><a href="/en/date?date=2019-06-01">2019-06-01</a></td>
    <td></td>
    <td>2681⁄4</td>
    <td><a href="/en/proboxer/659461">Anthony Joshua</a></td>
    <td>2471⁄2</td>
    <td><div class="boutResult">W</div></td>
    <td>TKO</td>
    <td>7/7</td>
    <td><a href="/en/event/779305/2822374">event</a></td>
  </tr>
  <tr class="drawRowBorder" id="2900001">
    <td><a href="/en/date?date=2019-12-07">2019-12-07</a></td>
    <td></td>
    <td>283</td>
    <td><a href="/en/proboxer/659461">Anthony Joshua</a></td>
    <td>237</td>
    <td><div class="boutResult">L</div></td>
    <td>UD</td>
    <td>12/12</td>
    <td><a href="/en/event/790001/2900001">event</a></td>
  </tr>
  </tbody>
</table>
</body></html>"#;

    #[test]
    fn rows_become_snippets_in_order() {
        let snippets = CareerExtractor::new().extract_snippets("389442", CAREER_PAGE).unwrap();
        assert_eq!(snippets.len(), 2);

        let first = &snippets[0];
        assert_eq!(first.fsnip_fight_id, 2822374);
        assert_eq!(first.fsnip_event_fight_id, "779305/2822374");
        assert_eq!(first.fsnip_fight_date, NaiveDate::from_ymd_opt(2019, 6, 1));
        assert_eq!(first.fsnip_boxer_weighin_weight, 268.25);
        assert_eq!(first.fsnip_opp_name, "Anthony Joshua");
        assert_eq!(first.fsnip_br_opp_id, 659461);
        assert_eq!(first.fsnip_opp_weighin_weight, 247.5);
        assert_eq!(first.fsnip_fight_result, "W");
        assert_eq!(first.fsnip_fight_result_type, "TKO");
        assert_eq!(
            (first.fsnip_fight_rounds_completed, first.fsnip_fight_rounds_scheduled),
            (7, 7)
        );

        assert_eq!(snippets[1].fsnip_fight_result, "L");
        assert_eq!(snippets[1].fsnip_fight_rounds_completed, 12);
    }

    #[test]
    fn every_snippet_carries_the_page_boxer() {
        let snippets = CareerExtractor::new().extract_snippets("389442", CAREER_PAGE).unwrap();
        assert!(snippets
            .iter()
            .all(|s| s.boxer_name == "Andy Ruiz Jr" && s.br_boxer_id == 389442));
    }

    #[test]
    fn sparse_row_keeps_defaults() {
        let html = r#"<html><body>
<h1 style="display:inline-block;margin-right:10px;line-height:30px;">Andy Ruiz Jr</h1>
<table><tr class="drawRowBorder" id="">
  <td>scheduled</td>
</tr></table>
</body></html>"#;
        let snippets = CareerExtractor::new().extract_snippets("389442-2", html).unwrap();
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].fsnip_fight_id, 0);
        assert_eq!(snippets[0].fsnip_fight_date, None);
        assert_eq!(snippets[0].fsnip_event_fight_id, "");
        assert_eq!(snippets[0].br_boxer_id, 0);
    }

    #[test]
    fn page_without_name_fails() {
        let html = CAREER_PAGE.replace("Andy Ruiz Jr</h1>", "</h1>");
        let err = CareerExtractor::new().extract_snippets("389442", &html).unwrap_err();
        assert!(matches!(err, ExtractError::MissingAnchor(_)));
    }
}
