// src/extractors/fight.rs

// --- Imports ---
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::fragment::{
    find_by_style, find_by_text, id_from_href, paired_text, parent_element, selector, text_of, Side,
};
use super::text::{clean_text, measurement_units};
use super::DocumentExtractor;
use crate::records::{Fight, FightBuilder};
use crate::utils::error::ExtractError;

// --- Constants ---
const FIGHT_DATE_FORMAT: &str = "%A %d, %B %Y";
const TITLE_FIGHT_FLAG: &str = "Title Fight";
const BOXER_L_STYLE: &str = "text-align:right;";
const BOXER_R_STYLE: &str = "text-align:left;";
const VENUE_STYLE: &str = "text-align:left;display:inline-block;";

// --- CSS Selectors (Lazy Static) ---
static H2_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("h2"));
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("a"));
static BOLD_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("b"));
static TD_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("td"));
static DIV_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("div"));
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("div.titleColor"));
static WON_MARKER_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("span.textWon"));
// html5ever puts a tbody between table and tr
static SCORECARD_ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| selector("div.singleColumn > div.overflowScroll > table tr"));
static JUDGE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(r#"a[href*="judge"]"#));
static REFEREE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(r#"a[href*="referee"]"#));

// --- Regex Patterns (Lazy Static) ---
static CONTEST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.*?)\bcontest\b").expect("Failed to compile CONTEST_RE")
});

type Setter<T> = fn(&mut FightBuilder, T);

/// One boxer's name cell: the anchor to their profile and the cell itself.
struct BoxerCell<'a> {
    cell: ElementRef<'a>,
    id: u64,
    name: String,
}

// --- Field extractors ---

/// Date from the last `h2` carrying a link.
fn add_fight_date(h2_tags: &[ElementRef], builder: &mut FightBuilder) {
    let Some(tag) = h2_tags.iter().rev().find(|t| t.select(&ANCHOR_SELECTOR).next().is_some()) else {
        return;
    };
    match NaiveDate::parse_from_str(&text_of(*tag), FIGHT_DATE_FORMAT) {
        Ok(date) => {
            builder.fight_date(date);
        }
        Err(e) => tracing::debug!("Unparseable fight date '{}': {}", text_of(*tag), e),
    }
}

/// `"<Weight> Contest, <N> Rounds"`.
fn add_fight_weightclass_and_rounds(h2_tags: &[ElementRef], builder: &mut FightBuilder) {
    for tag in h2_tags {
        let text = text_of(*tag);
        let Some(caps) = CONTEST_RE.captures(&text) else {
            continue;
        };
        builder.fight_weightclass(clean_text(&caps[1]));
        if let Some((_, rounds)) = text.split_once(',') {
            let rounds = rounds.to_lowercase();
            if let Ok(n) = clean_text(rounds.split('r').next().unwrap_or_default()).parse::<u32>() {
                builder.fight_rounds_scheduled(n);
            }
        }
    }
}

fn add_fight_venue(venue_div: ElementRef, builder: &mut FightBuilder) {
    let parts: Vec<String> = venue_div
        .select(&ANCHOR_SELECTOR)
        .skip(1)
        .map(text_of)
        .collect();
    builder.fight_venue(parts.join(", "));
}

fn add_fight_referee(referee: ElementRef, builder: &mut FightBuilder) {
    builder.fight_referee_name(text_of(referee));
}

/// Two or three judges, in document order; any other count sets nothing.
fn add_fight_judges(judges: &[ElementRef], builder: &mut FightBuilder) {
    let slots: [(Setter<String>, Setter<u32>, Setter<u32>); 3] = [
        (
            |b, v| { b.fight_judge1_name(v); },
            |b, v| { b.fight_judge1_score_l(v); },
            |b, v| { b.fight_judge1_score_r(v); },
        ),
        (
            |b, v| { b.fight_judge2_name(v); },
            |b, v| { b.fight_judge2_score_l(v); },
            |b, v| { b.fight_judge2_score_r(v); },
        ),
        (
            |b, v| { b.fight_judge3_name(v); },
            |b, v| { b.fight_judge3_score_l(v); },
            |b, v| { b.fight_judge3_score_r(v); },
        ),
    ];

    if !matches!(judges.len(), 2 | 3) {
        tracing::debug!("Found {} judge anchors, skipping judges", judges.len());
        return;
    }

    for (judge, (set_name, set_l, set_r)) in judges.iter().zip(slots) {
        set_name(builder, text_of(*judge));
        let Some(cell) = parent_element(*judge) else {
            continue;
        };
        if let Some(score) = paired_score(cell, Side::Left) {
            set_l(builder, score);
        }
        if let Some(score) = paired_score(cell, Side::Right) {
            set_r(builder, score);
        }
    }
}

/// A referee row that carries scores stands in for the third judge.
fn add_referee_scores(referee: ElementRef, builder: &mut FightBuilder) {
    if !builder.peek().fight_judge3_name.is_empty() {
        return;
    }
    let Some(cell) = parent_element(referee) else {
        return;
    };
    if let (Some(left), Some(right)) = (paired_score(cell, Side::Left), paired_score(cell, Side::Right)) {
        builder
            .fight_judge3_name(text_of(referee))
            .fight_judge3_score_l(left)
            .fight_judge3_score_r(right);
    }
}

fn paired_score(cell: ElementRef, side: Side) -> Option<u32> {
    paired_text(cell, side)?.parse().ok()
}

fn add_boxers(left: &BoxerCell, right: &BoxerCell, builder: &mut FightBuilder) {
    builder
        .boxer_name_l(left.name.as_str())
        .boxer_name_r(right.name.as_str())
        .boxer_boxrec_id_l(left.id)
        .boxer_boxrec_id_r(right.id);
}

/// The left cell's "won" marker decides; without it the right boxer won.
fn add_winner_loser(left: &BoxerCell, right: &BoxerCell, builder: &mut FightBuilder) {
    let left_won = left.cell.select(&WON_MARKER_SELECTOR).next().is_some();
    let (winner, loser) = if left_won { (left, right) } else { (right, left) };
    builder
        .fight_winner_id(winner.id)
        .fight_winner_name(winner.name.as_str())
        .fight_loser_id(loser.id)
        .fight_loser_name(loser.name.as_str());
}

/// `"1094.5p"` on either side of the "after fight" label.
fn add_points_after(label: ElementRef, builder: &mut FightBuilder) {
    let points = |side| -> Option<f64> {
        let text = paired_text(label, side)?;
        clean_text(text.split('p').next()?).parse().ok()
    };
    if let Some(p) = points(Side::Left) {
        builder.boxer_points_after_l(p);
    }
    if let Some(p) = points(Side::Right) {
        builder.boxer_points_after_r(p);
    }
}

/// Integer pair around `label`, each side independent.
fn add_paired_count(label: ElementRef, builder: &mut FightBuilder, set_l: Setter<u32>, set_r: Setter<u32>) {
    if let Some(v) = paired_score(label, Side::Left) {
        set_l(builder, v);
    }
    if let Some(v) = paired_score(label, Side::Right) {
        set_r(builder, v);
    }
}

/// Non-empty text pair around `label`.
fn add_paired_text(label: ElementRef, builder: &mut FightBuilder, set_l: Setter<String>, set_r: Setter<String>) {
    for (side, set) in [(Side::Left, set_l), (Side::Right, set_r)] {
        if let Some(text) = paired_text(label, side).filter(|t| !t.is_empty()) {
            set(builder, text);
        }
    }
}

fn add_heights(label: ElementRef, builder: &mut FightBuilder) {
    add_paired_text(label, builder, |b, v| { b.boxer_height_l(v); }, |b, v| { b.boxer_height_r(v); });
    let (ft_l, cm_l) = measurement_units(&builder.peek().boxer_height_l);
    let (ft_r, cm_r) = measurement_units(&builder.peek().boxer_height_r);
    builder
        .boxer_height_ft_l(ft_l)
        .boxer_height_cm_l(cm_l)
        .boxer_height_ft_r(ft_r)
        .boxer_height_cm_r(cm_r);
}

fn add_reach(label: ElementRef, builder: &mut FightBuilder) {
    add_paired_text(label, builder, |b, v| { b.boxer_reach_l(v); }, |b, v| { b.boxer_reach_r(v); });
    let (ft_l, cm_l) = measurement_units(&builder.peek().boxer_reach_l);
    let (ft_r, cm_r) = measurement_units(&builder.peek().boxer_reach_r);
    builder
        .boxer_reach_ft_l(ft_l)
        .boxer_reach_cm_l(cm_l)
        .boxer_reach_ft_r(ft_r)
        .boxer_reach_cm_r(cm_r);
}

fn add_title(title_div: ElementRef, builder: &mut FightBuilder) {
    let titles: Vec<String> = title_div.select(&ANCHOR_SELECTOR).map(text_of).collect();
    builder
        .title_fight_flag(TITLE_FIGHT_FLAG.to_string())
        .fight_titles_avail(titles);
}

/// `"... round 7 ..."` in the left boxer's row, else the scheduled rounds.
fn add_fight_rounds_completed(left: &BoxerCell, builder: &mut FightBuilder) {
    let row_text = parent_element(left.cell)
        .map(|row| row.text().collect::<String>().to_lowercase())
        .unwrap_or_default();

    let stopped_in = row_text.split_once("round").and_then(|(_, after)| {
        let after = clean_text(after);
        let two: String = after.chars().take(2).collect();
        two.trim().parse::<u32>().ok()
    });

    let rounds = stopped_in.unwrap_or(builder.peek().fight_rounds_scheduled);
    builder.fight_rounds_completed(rounds);
}

// --- Document extractor ---

/// Extracts a [`Fight`] from a fight page.
#[derive(Debug, Default, Clone)]
pub struct FightExtractor;

impl FightExtractor {
    pub fn new() -> Self {
        Self
    }

    fn boxer_cell<'a>(document: &'a Html, style: &str) -> Result<BoxerCell<'a>, ExtractError> {
        let cell = find_by_style(document.root_element(), &TD_SELECTOR, style)
            .ok_or_else(|| ExtractError::MissingAnchor(format!("boxer name cell td[style=\"{}\"]", style)))?;
        let anchor = cell
            .select(&ANCHOR_SELECTOR)
            .next()
            .ok_or_else(|| ExtractError::MissingAnchor(format!("boxer link in td[style=\"{}\"]", style)))?;
        let href = anchor.value().attr("href").unwrap_or_default();
        let id = id_from_href(href)
            .ok_or_else(|| ExtractError::MissingAnchor(format!("boxer id in href '{}'", href)))?;
        Ok(BoxerCell { cell, id, name: text_of(anchor) })
    }

    /// Extracts one fight page.
    ///
    /// Extractor order: date, weight class and scheduled rounds, venue,
    /// referee, judges, boxer names and ids, winner/loser, points after,
    /// ages, stances, heights, reach, record before the fight, title, referee
    /// as third judge, rounds completed. Rounds completed reads the scheduled
    /// rounds set earlier; the referee step reads the judge names.
    pub fn extract_fight(&self, event_fight_id: &str, html: &str) -> Result<Fight, ExtractError> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        // Required anchors first: no boxers, no fight.
        let left = Self::boxer_cell(&document, BOXER_L_STYLE)?;
        let right = Self::boxer_cell(&document, BOXER_R_STYLE)?;

        let h2_tags: Vec<ElementRef> = document.select(&H2_SELECTOR).collect();
        let venue_div = find_by_style(root, &DIV_SELECTOR, VENUE_STYLE);
        let scorecard = document.select(&SCORECARD_ROW_SELECTOR).next();
        let judges: Vec<ElementRef> = scorecard
            .map(|row| row.select(&JUDGE_SELECTOR).collect())
            .unwrap_or_default();
        let referee = scorecard.and_then(|row| row.select(&REFEREE_SELECTOR).next());
        let label = |text: &str| find_by_text(root, &BOLD_SELECTOR, text).and_then(parent_element);
        let title_div = document.select(&TITLE_SELECTOR).next();

        tracing::trace!(
            "Located fragments for {}: {} h2, {} judges, referee={}, title={}",
            event_fight_id,
            h2_tags.len(),
            judges.len(),
            referee.is_some(),
            title_div.is_some()
        );

        let mut builder = FightBuilder::new();
        builder.event_fight_key(event_fight_id);

        add_fight_date(&h2_tags, &mut builder);
        add_fight_weightclass_and_rounds(&h2_tags, &mut builder);
        if let Some(div) = venue_div {
            add_fight_venue(div, &mut builder);
        }
        if let Some(referee) = referee {
            add_fight_referee(referee, &mut builder);
        }
        add_fight_judges(&judges, &mut builder);
        add_boxers(&left, &right, &mut builder);
        add_winner_loser(&left, &right, &mut builder);
        if let Some(l) = label("after fight") {
            add_points_after(l, &mut builder);
        }
        if let Some(l) = label("age") {
            add_paired_count(l, &mut builder, |b, v| { b.boxer_age_l(v); }, |b, v| { b.boxer_age_r(v); });
        }
        if let Some(l) = label("stance") {
            add_paired_text(l, &mut builder, |b, v| { b.boxer_stance_l(v); }, |b, v| { b.boxer_stance_r(v); });
        }
        if let Some(l) = label("height") {
            add_heights(l, &mut builder);
        }
        if let Some(l) = label("reach") {
            add_reach(l, &mut builder);
        }
        let record_before: [(&str, Setter<u32>, Setter<u32>); 4] = [
            ("won", |b, v| { b.boxer_wins_before_l(v); }, |b, v| { b.boxer_wins_before_r(v); }),
            ("lost", |b, v| { b.boxer_losses_before_l(v); }, |b, v| { b.boxer_losses_before_r(v); }),
            ("drawn", |b, v| { b.boxer_draws_before_l(v); }, |b, v| { b.boxer_draws_before_r(v); }),
            ("KOs", |b, v| { b.boxer_kos_before_l(v); }, |b, v| { b.boxer_kos_before_r(v); }),
        ];
        for (text, set_l, set_r) in record_before {
            if let Some(l) = label(text) {
                add_paired_count(l, &mut builder, set_l, set_r);
            }
        }
        if let Some(div) = title_div {
            add_title(div, &mut builder);
        }
        if let Some(referee) = referee {
            add_referee_scores(referee, &mut builder);
        }
        add_fight_rounds_completed(&left, &mut builder);

        Ok(builder.build())
    }
}

impl DocumentExtractor for FightExtractor {
    type Output = Fight;

    fn kind(&self) -> &'static str {
        "fight"
    }

    fn extract(&self, key: &str, html: &str) -> Result<Fight, ExtractError> {
        self.extract_fight(key, html)
    }
}
