#![forbid(unsafe_code)]
use chrono::NaiveDate;
use escala::{io, Assignment, PersonId};

fn sample() -> Vec<Assignment> {
    let ids = |names: &[&str]| -> Vec<PersonId> { names.iter().map(PersonId::new).collect() };
    vec![
        Assignment {
            date: NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
            food_team: ids(&["ana", "bia"]),
            drink_team: ids(&["caio"]),
            free_team: ids(&["davi"]),
        },
        Assignment {
            date: NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(),
            food_team: ids(&["caio", "davi"]),
            drink_team: ids(&["ana"]),
            free_team: ids(&["bia"]),
        },
    ]
}

#[test]
fn csv_export_joins_members() {
    let mut buf = Vec::new();
    io::write_schedule_csv(&mut buf, &sample()).unwrap();
    let csv = String::from_utf8(buf).unwrap();
    insta::assert_snapshot!(csv, @r"
    date,food_team,drink_team,free_team
    2026-02-20,ana;bia,caio,davi
    2026-02-27,caio;davi,ana,bia
    ");
}

#[test]
fn records_keep_persistence_shape() {
    let value = serde_json::to_value(&sample()[0]).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "date": "2026-02-20",
            "food_team": ["ana", "bia"],
            "drink_team": ["caio"],
            "free_team": ["davi"],
        })
    );
}
