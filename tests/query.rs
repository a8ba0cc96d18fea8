//! Integration tests for rankings, lookups, classification and CSV export.

use volley_insight::{
    accumulate, player_stats, players_for_team, top_players, write_csv, Action, MatchStats,
    Outcome, Rally, Score, Sides, StatKey, StatKeyError, TeamSide, Touch, DEFAULT_TOP_LIMIT,
};

fn sample_match() -> MatchStats {
    let sides = Sides::new("aluron", "bogdanka");
    let t = |action: &str, player: &str, team: &str| Touch::from_text(action, player, team, &sides);
    let rallies = vec![
        Rally::new(1, TeamSide::Home, vec![t("serve ace", "Ace", "aluron")]),
        Rally::new(
            2,
            TeamSide::Away,
            vec![
                t("serve", "Ace", "aluron"),
                t("pass", "Lis", "bogdanka"),
                t("set", "Komenda", "bogdanka"),
                t("attack kill", "Wrona", "bogdanka"),
            ],
        ),
        Rally::new(
            3,
            TeamSide::Home,
            vec![
                t("serve", "Nowak", "bogdanka"),
                t("pass", "Zatorski", "aluron"),
                t("set", "Janusz", "aluron"),
                t("attack kill", "Bieniek", "aluron"),
            ],
        ),
        Rally::new(4, TeamSide::Away, vec![t("serve error", "Grozer", "aluron")]),
    ];
    accumulate(&rallies)
}

#[test]
fn top_players_sorted_descending_with_stable_ties() {
    let stats = sample_match();
    let top = top_players(&stats, StatKey::TotalPoints, 3);
    let names: Vec<&str> = top.iter().map(|p| p.name.as_str()).collect();
    // Ace, Wrona and Bieniek all have one point; first-sighting order decides.
    assert_eq!(names, vec!["Ace", "Wrona", "Bieniek"]);
}

#[test]
fn top_players_handles_negative_values_and_limits() {
    let stats = sample_match();
    let all = top_players(&stats, StatKey::PointBalance, 100);
    assert_eq!(all.len(), stats.players.len());
    assert_eq!(all.last().unwrap().name, "Grozer");
    assert!(top_players(&stats, StatKey::ServeAll, 0).is_empty());
    assert_eq!(top_players(&stats, StatKey::SetAll, DEFAULT_TOP_LIMIT).len(), DEFAULT_TOP_LIMIT);
}

#[test]
fn player_lookup_is_exact() {
    let stats = sample_match();
    assert_eq!(player_stats(&stats, "Wrona").unwrap().attack_score, 1);
    assert!(player_stats(&stats, "wrona").is_none());
    assert!(player_stats(&stats, "Nobody").is_none());
}

#[test]
fn players_for_team_keeps_order() {
    let stats = sample_match();
    let away: Vec<&str> = players_for_team(&stats, TeamSide::Away)
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(away, vec!["Lis", "Komenda", "Wrona", "Nowak"]);
}

#[test]
fn stat_keys_parse_from_json_names() {
    assert_eq!("attackEff".parse::<StatKey>(), Ok(StatKey::AttackEff));
    assert_eq!("setToScore".parse::<StatKey>(), Ok(StatKey::SetToScore));
    assert_eq!(
        "attack_eff".parse::<StatKey>(),
        Err(StatKeyError("attack_eff".to_string()))
    );
    for key in StatKey::ALL {
        assert_eq!(key.as_str().parse::<StatKey>(), Ok(key));
    }
}

#[test]
fn free_text_classification_never_double_counts() {
    assert_eq!(Action::parse("Block Error"), Action::Block(Outcome::Error));
    assert_eq!(Action::parse("serve ace"), Action::Serve(Outcome::Point));
    assert_eq!(Action::parse("reception perfect"), Action::Pass(Outcome::Perfect));
    assert_eq!(Action::parse("attack point"), Action::Attack(Outcome::Point));
    assert_eq!(Action::parse("dig"), Action::Dig(Outcome::Continue));
    assert_eq!(Action::parse("set"), Action::Set);
    assert_eq!(Action::parse("timeout"), Action::Other);
    assert_eq!(Action::from_feed("Attack", "Kill"), Action::Attack(Outcome::Point));
    assert_eq!(Action::from_feed("Serve", "Error"), Action::Serve(Outcome::Error));
}

#[test]
fn outcome_words_match_whole_words_only() {
    assert_eq!(Action::parse("serve placed"), Action::Serve(Outcome::Continue));
    assert_eq!(Action::parse("attack pointed"), Action::Attack(Outcome::Continue));
    assert_eq!(Action::parse("dig (good)"), Action::Dig(Outcome::Positive));
    assert_eq!(Action::parse("attack kill"), Action::Attack(Outcome::Point));
    assert_eq!(Action::parse("Serve: Ace"), Action::Serve(Outcome::Point));
    assert_eq!(Action::parse("block kill error"), Action::Block(Outcome::Error));
}

#[test]
fn perfect_result_depends_on_the_skill() {
    assert_eq!(Action::from_feed("Serve", "Perfect"), Action::Serve(Outcome::Point));
    assert_eq!(Action::from_feed("Attack", "Perfect"), Action::Attack(Outcome::Point));
    assert_eq!(Action::from_feed("Block", "Perfect"), Action::Block(Outcome::Point));
    assert_eq!(Action::from_feed("Reception", "Perfect"), Action::Pass(Outcome::Perfect));
    assert_eq!(Action::from_feed("Dig", "Perfect"), Action::Dig(Outcome::Perfect));
}

#[test]
fn scores_parse_leniently() {
    assert_eq!(Score::parse(" 12 : 7 "), Score::new(12, 7));
    assert_eq!(Score::parse("abc:"), Score::new(0, 0));
    assert_eq!(Score::parse("3"), Score::new(3, 0));
    assert_eq!(Score::parse(""), Score::new(0, 0));
    assert_eq!(Score::parse("4294967296:2"), Score::new(0, 2));
}

#[test]
fn scoring_side_needs_a_single_point_step() {
    let side = |before: Score, after: Score| {
        Rally::new(1, TeamSide::Unknown, Vec::new())
            .with_scores(before, after)
            .scoring_side_from_scores()
    };
    assert_eq!(side(Score::new(3, 4), Score::new(4, 4)), Some(TeamSide::Home));
    assert_eq!(side(Score::new(3, 4), Score::new(3, 5)), Some(TeamSide::Away));
    assert_eq!(side(Score::new(3, 4), Score::new(3, 4)), None);
    assert_eq!(side(Score::new(3, 4), Score::new(5, 4)), None);
    assert_eq!(side(Score::new(u32::MAX, 0), Score::new(0, 0)), None);
    assert_eq!(side(Score::new(0, u32::MAX), Score::new(0, 0)), None);
    assert_eq!(side(Score::new(u32::MAX - 1, 0), Score::new(u32::MAX, 0)), Some(TeamSide::Home));
}

#[test]
fn action_labels_parse_back() {
    let actions = [
        Action::Serve(Outcome::Point),
        Action::Pass(Outcome::Positive),
        Action::Attack(Outcome::Error),
        Action::Block(Outcome::Continue),
        Action::Dig(Outcome::Perfect),
        Action::Set,
        Action::Other,
    ];
    for action in actions {
        assert_eq!(Action::parse(&action.label()), action);
    }
}

#[test]
fn sides_resolve_without_guessing() {
    let sides = Sides::new("Aluron CMC Warta Zawiercie", "Bogdanka LUK Lublin");
    assert_eq!(sides.resolve("HOME"), TeamSide::Home);
    assert_eq!(sides.resolve("bogdanka luk lublin"), TeamSide::Away);
    assert_eq!(sides.resolve("Jastrzębski Węgiel"), TeamSide::Unknown);
    assert_eq!(sides.resolve(""), TeamSide::Unknown);

    let short = Sides::new("aluron", "bogdanka");
    assert_eq!(short.resolve("Aluron CMC"), TeamSide::Home);
}

#[test]
fn csv_export_has_header_and_one_row_per_player() {
    let stats = sample_match();
    let mut buf = Vec::new();
    write_csv(&stats, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), stats.players.len() + 1);
    assert!(lines[0].starts_with("name,team,number,totalPoints,breakPoints,pointBalance"));
    assert!(lines[1].starts_with("Ace,home,,1,0,1,2,0,1,50,"));
    assert!(lines.iter().any(|l| l.starts_with("Grozer,home,,0,0,-1,1,1,0,-100,")));
}

#[test]
fn stats_serialize_with_players_in_order() {
    let stats = sample_match();
    let json = serde_json::to_string(&stats).unwrap();
    let ace = json.find("\"Ace\":").unwrap();
    let grozer = json.find("\"Grozer\":").unwrap();
    assert!(ace < grozer);
    assert!(json.contains("\"attackSkut\":100.0"));
    assert!(json.contains("\"unattributedTouches\":0"));
}
