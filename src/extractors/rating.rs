// src/extractors/rating.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::fragment::{child_elements, id_from_href, selector, text_of};
use super::text::career_years;
use super::DocumentExtractor;
use crate::records::{RatingPage, RatingRow, RatingRowBuilder};
use crate::utils::error::ExtractError;

const RATINGS_TITLE: &str = "BoxRec: Ratings";
const RATING_CELL_COUNT: usize = 6;

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("title"));
static PAGER_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("span.pagerCurrent"));
// html5ever gives every table a tbody, so the ratings table must be named
static BODY_ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("table.dataTable > tbody > tr"));
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("a"));

/// Splits `"12-3-1"` into wins, losses and draws.
///
/// Anything other than exactly three integer parts is rejected.
pub fn win_loss_draw(wld: &str) -> Option<(u32, u32, u32)> {
    let parts: Vec<&str> = wld.split('-').collect();
    match parts.as_slice() {
        [w, l, d] => Some((w.parse().ok()?, l.parse().ok()?, d.parse().ok()?)),
        _ => None,
    }
}

/// Rank, boxer, points, w-l-d, division, career span.
fn extract_row(cells: &[ElementRef]) -> Result<RatingRow, ExtractError> {
    let [rank, boxer, points, wld, division, span, ..] = cells else {
        return Err(ExtractError::MalformedRow(format!(
            "expected {} cells, found {}",
            RATING_CELL_COUNT,
            cells.len()
        )));
    };

    let rank_text = text_of(*rank);
    let rating: u32 = rank_text
        .parse()
        .map_err(|_| ExtractError::MalformedRow(format!("rank '{}'", rank_text)))?;
    let points_text = text_of(*points);
    let br_points: f64 = points_text
        .parse()
        .map_err(|_| ExtractError::MalformedRow(format!("points '{}'", points_text)))?;
    let boxer_wld = text_of(*wld).replace(' ', "-");
    let (wins, losses, draws) = win_loss_draw(&boxer_wld)
        .ok_or_else(|| ExtractError::MalformedRow(format!("win-loss-draw '{}'", boxer_wld)))?;
    let bouts = wins
        .checked_add(losses)
        .and_then(|sum| sum.checked_add(draws))
        .ok_or_else(|| ExtractError::MalformedRow(format!("bout total of '{}' overflows", boxer_wld)))?;

    let mut builder = RatingRowBuilder::new();
    builder
        .br_rating(rating)
        .boxer_name(text_of(*boxer))
        .br_points(br_points)
        .weightclass(text_of(*division))
        .boxer_wld(boxer_wld)
        .win_tot(wins)
        .loss_tot(losses)
        .draw_tot(draws)
        .bout_tot(bouts);

    let boxer_id = boxer
        .select(&ANCHOR_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(id_from_href);
    if let Some(id) = boxer_id {
        builder.br_boxer_id(id);
    }

    let career_date_span = text_of(*span);
    if let Some((start, end)) = career_years(&career_date_span) {
        builder.career_start_year(start).career_end_year(end);
    }
    builder.career_date_span(career_date_span);

    Ok(builder.build())
}

/// Extracts the ranked rows of one ratings page.
#[derive(Debug, Default, Clone)]
pub struct RatingsExtractor;

impl RatingsExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Rows that fail coercion land in [`RatingPage::error_rows`] as their
    /// cell texts; the page itself never fails.
    pub fn extract_rows(&self, page_key: &str, html: &str) -> RatingPage {
        let document = Html::parse_document(html);

        let page_num = document
            .select(&PAGER_SELECTOR)
            .last()
            .map(text_of)
            .unwrap_or_else(|| page_key.to_string());
        let title = document.select(&TITLE_SELECTOR).next().map(text_of).unwrap_or_default();
        let rows: Vec<ElementRef> = document.select(&BODY_ROW_SELECTOR).collect();

        if rows.is_empty() || title != RATINGS_TITLE {
            tracing::warn!("Ratings html was not rendered for parsing, page: {}", page_num);
        }

        let mut page = RatingPage::default();
        for row in rows {
            let cells = child_elements(row);
            match extract_row(&cells) {
                Ok(rating) => page.rows.push(rating),
                Err(e) => {
                    tracing::debug!("Diverting row on ratings page {}: {}", page_num, e);
                    page.error_rows.push(cells.into_iter().map(text_of).collect());
                }
            }
        }
        page
    }
}

impl DocumentExtractor for RatingsExtractor {
    type Output = RatingPage;

    fn kind(&self) -> &'static str {
        "ratings"
    }

    fn extract(&self, key: &str, html: &str) -> Result<RatingPage, ExtractError> {
        Ok(self.extract_rows(key, html))
    }
}
