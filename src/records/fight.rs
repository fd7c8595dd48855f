// src/records/fight.rs
use chrono::NaiveDate;

use super::record;

record! {
    /// One bout between two boxers, as shown on its fight page.
    ///
    /// `_l` / `_r` fields describe the boxer in the left / right column.
    pub struct Fight / FightBuilder {
        /// `"<event_id>/<fight_id>"`
        event_fight_id: String = String::new(),
        event_id: u64 = 0,
        fight_id: u64 = 0,
        fight_date: Option<NaiveDate> = None,
        fight_winner_id: u64 = 0,
        fight_winner_name: String = String::new(),
        fight_loser_id: u64 = 0,
        fight_loser_name: String = String::new(),
        fight_weightclass: String = String::new(),
        title_fight_flag: Option<String> = None,
        fight_venue: String = String::new(),
        fight_rounds_completed: u32 = 0,
        fight_rounds_scheduled: u32 = 0,

        boxer_name_l: String = String::new(),
        boxer_name_r: String = String::new(),
        boxer_boxrec_id_l: u64 = 0,
        boxer_boxrec_id_r: u64 = 0,
        boxer_wins_before_l: u32 = 0,
        boxer_losses_before_l: u32 = 0,
        boxer_draws_before_l: u32 = 0,
        boxer_kos_before_l: u32 = 0,
        boxer_wins_before_r: u32 = 0,
        boxer_losses_before_r: u32 = 0,
        boxer_draws_before_r: u32 = 0,
        boxer_kos_before_r: u32 = 0,
        boxer_age_l: u32 = 0,
        boxer_age_r: u32 = 0,
        boxer_stance_l: String = String::new(),
        boxer_stance_r: String = String::new(),

        boxer_height_l: String = String::new(),
        boxer_height_r: String = String::new(),
        boxer_height_ft_l: Option<f64> = None,
        boxer_height_ft_r: Option<f64> = None,
        boxer_height_cm_l: Option<u32> = None,
        boxer_height_cm_r: Option<u32> = None,
        boxer_reach_l: String = String::new(),
        boxer_reach_r: String = String::new(),
        boxer_reach_ft_l: Option<f64> = None,
        boxer_reach_ft_r: Option<f64> = None,
        boxer_reach_cm_l: Option<u32> = None,
        boxer_reach_cm_r: Option<u32> = None,
        boxer_points_after_l: f64 = 0.0,
        boxer_points_after_r: f64 = 0.0,

        fight_referee_name: String = String::new(),
        fight_judge1_name: String = String::new(),
        fight_judge1_score_l: u32 = 0,
        fight_judge1_score_r: u32 = 0,
        fight_judge2_name: String = String::new(),
        fight_judge2_score_l: u32 = 0,
        fight_judge2_score_r: u32 = 0,
        fight_judge3_name: String = String::new(),
        fight_judge3_score_l: u32 = 0,
        fight_judge3_score_r: u32 = 0,

        fight_titles_avail: Vec<String> = Vec::new(),
    }
}

impl FightBuilder {
    /// Sets the composite id and the two ids split out of it.
    ///
    /// A key that does not split into two integers keeps the numeric ids at 0.
    pub fn event_fight_key(&mut self, key: &str) -> &mut Self {
        self.event_fight_id(key);
        if let Some((event, fight)) = key.split_once('/') {
            if let (Ok(event), Ok(fight)) = (event.trim().parse::<u64>(), fight.trim().parse::<u64>()) {
                self.event_id(event).fight_id(fight);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Tabular;

    #[test]
    fn unset_fields_take_declared_defaults() {
        let fight = FightBuilder::new().build();
        assert_eq!(fight, Fight::default());
        assert_eq!(fight.fight_date, None);
        assert_eq!(fight.boxer_height_ft_l, None);
        assert_eq!(fight.fight_judge3_score_r, 0);
        assert!(fight.fight_titles_avail.is_empty());
        assert_eq!(fight.title_fight_flag, None);
    }

    #[test]
    fn builder_reads_back_what_was_set() {
        let date = NaiveDate::from_ymd_opt(2019, 6, 1).unwrap();
        let mut builder = FightBuilder::new();
        builder
            .event_fight_key("765205/2372960")
            .fight_date(date)
            .fight_winner_id(9625u64)
            .fight_winner_name("Andy Ruiz Jr")
            .fight_loser_id(659772u64)
            .fight_loser_name("Anthony Joshua")
            .boxer_height_ft_l(6.17)
            .boxer_height_cm_l(188u32)
            .title_fight_flag("Title Fight".to_string())
            .fight_titles_avail(vec!["WBA World Heavyweight Title".to_string()]);
        let fight = builder.build();

        assert_eq!(fight.event_fight_id, "765205/2372960");
        assert_eq!(fight.event_id, 765205);
        assert_eq!(fight.fight_id, 2372960);
        assert_eq!(fight.fight_date, Some(date));
        assert_eq!(fight.fight_winner_name, "Andy Ruiz Jr");
        assert_eq!(fight.fight_loser_id, 659772);
        assert_eq!(fight.boxer_height_ft_l, Some(6.17));
        assert_eq!(fight.boxer_height_cm_l, Some(188));
        assert_eq!(fight.title_fight_flag.as_deref(), Some("Title Fight"));
        assert_eq!(fight.fight_titles_avail, vec!["WBA World Heavyweight Title"]);
        // untouched
        assert_eq!(fight.boxer_reach_cm_r, None);
        assert_eq!(fight.fight_judge1_name, "");
    }

    #[test]
    fn malformed_key_keeps_numeric_ids_at_default() {
        let mut builder = FightBuilder::new();
        builder.event_fight_key("not-a-key");
        let fight = builder.build();
        assert_eq!(fight.event_fight_id, "not-a-key");
        assert_eq!((fight.event_id, fight.fight_id), (0, 0));
    }

    #[test]
    fn tabular_row_matches_headers() {
        let fight = Fight::default();
        let headers = Fight::headers();
        let row = fight.to_row();
        assert_eq!(headers.len(), row.len());
        assert_eq!(headers[0], "event_fight_id");
        assert_eq!(*headers.last().unwrap(), "fight_titles_avail");
    }
}
