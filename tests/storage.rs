//! Integration tests for CSV records.

use table_tennis_club::storage::{
    read_fixtures, read_matches, read_roster, write_fixtures, write_matches,
};
use table_tennis_club::{
    fixtures_from_rounds, schedule, validate_and_encode, Championship, EncodedSet, FixtureStatus,
    PlayerId, SetScore,
};

#[test]
fn match_rows_use_legacy_codes() {
    let sets = [
        SetScore::new(11, 5),
        SetScore::new(9, 11),
        SetScore::new(0, 11),
        SetScore::new(11, 0),
        SetScore::new(11, 7),
    ];
    let m = validate_and_encode("A", "B", &sets, "2025-01-06 20:15:00")
        .unwrap()
        .record;

    let mut out = Vec::new();
    write_matches(&mut out, &[m.clone()]).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        "winner,loser,set_1,set_2,set_3,set_4,set_5,date\nA,B,5,-9,-99,0,7,2025-01-06 20:15:00\n"
    );

    assert_eq!(read_matches(text.as_bytes()).unwrap(), vec![m]);
}

#[test]
fn unplayed_sets_are_empty_cells() {
    let csv = "winner,loser,set_1,set_2,set_3,set_4,set_5,date\n\
               Anne,Paul,3,-8,7,5,,2024-11-04 19:30:00\n";
    let matches = read_matches(csv.as_bytes()).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].sets[1], EncodedSet::LostByWinner { winner_points: 8 });
    assert_eq!(matches[0].sets[4], EncodedSet::NotPlayed);
    assert_eq!(matches[0].tally(), "3-1");
}

#[test]
fn malformed_match_rows_are_skipped() {
    let csv = "winner,loser,set_1,set_2,set_3,set_4,set_5,date\n\
               A,B,5,6,7,,,ok\n\
               A,B,5,abc,7,,,bad number\n\
               A,B,5,-6,,,,too few sets\n\
               A,B,5,6,7,8,,too many sets\n\
               A,B,5,500,7,,,out of range\n\
               C,D,0,0,-99,0,,ok too\n";
    let matches = read_matches(csv.as_bytes()).unwrap();

    let stamps: Vec<&str> = matches.iter().map(|m| m.timestamp.as_str()).collect();
    assert_eq!(stamps, vec!["ok", "ok too"]);
}

#[test]
fn fixtures_survive_a_write_and_read() {
    let players: Vec<PlayerId> = vec!["A".into(), "B".into(), "C".into()];
    let mut fixtures = fixtures_from_rounds(&schedule(&players, 42).unwrap());
    let first = &mut fixtures[0];
    let report = validate_and_encode(
        &first.player_a,
        &first.player_b,
        &[SetScore::new(11, 2), SetScore::new(11, 3), SetScore::new(11, 4)],
        "2025-02-03 21:00:00",
    )
    .unwrap();
    first.result = Some(report.record);
    first.status = FixtureStatus::Done;

    let mut out = Vec::new();
    write_fixtures(&mut out, &fixtures).unwrap();
    let back = read_fixtures(out.as_slice()).unwrap();
    assert_eq!(back, fixtures);

    let c = Championship::from_fixtures(back, 42);
    assert_eq!(c.participants, players);
    assert_eq!(c.progress().played, 1);
}

#[test]
fn done_fixture_with_foreign_winner_is_skipped() {
    let csv = "id,round,player_a,player_b,status,winner,loser,set_1,set_2,set_3,set_4,set_5,date\n\
               1,1,A,B,done,A,Z,1,2,3,,,t\n\
               2,1,C,D,to_play,,,,,,,,\n";
    let fixtures = read_fixtures(csv.as_bytes()).unwrap();

    assert_eq!(fixtures.len(), 1);
    assert_eq!(fixtures[0].id, 2);
    assert_eq!(fixtures[0].status, FixtureStatus::ToPlay);
}

#[test]
fn roster_rows_join_first_and_last_name() {
    let csv = "first_name,last_name\nAnne,Martin\n Paul , Petit \nSolo,\n";
    assert_eq!(
        read_roster(csv.as_bytes()).unwrap(),
        vec!["Anne Martin", "Paul Petit", "Solo"]
    );
}

#[test]
fn old_sheet_match_headers_are_read() {
    let csv = "vainqueur,adversaire,Set_1,Set_2,Set_3,Set_4,Set_5,date\n\
               Anne Martin,Paul Petit,5,-9,3,7,,2024-10-14 20:00:00\n";
    let matches = read_matches(csv.as_bytes()).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].winner, "Anne Martin");
    assert_eq!(matches[0].loser, "Paul Petit");
    assert_eq!(matches[0].sets[1], EncodedSet::LostByWinner { winner_points: 9 });
    assert_eq!(matches[0].tally(), "3-1");
}

#[test]
fn old_sheet_fixtures_are_numbered_in_file_order() {
    let csv = "joueur_1,joueur_2,tour n°,statut,vainqueur,adversaire,Set_1,Set_2,Set_3,Set_4,Set_5,date\n\
               A,B,Tour 1,terminé,B,A,4,6,8,,,2024-10-14 20:00:00\n\
               C,D,Tour 1,à jouer,,,,,,,,\n\
               A,C,Tour 2,à jouer,,,,,,,,\n";
    let fixtures = read_fixtures(csv.as_bytes()).unwrap();

    let ids: Vec<u32> = fixtures.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(fixtures[0].status, FixtureStatus::Done);
    assert_eq!(fixtures[0].result.as_ref().unwrap().winner, "B");
    assert_eq!(fixtures[1].status, FixtureStatus::ToPlay);
    assert_eq!(fixtures[2].round, 2);
}
