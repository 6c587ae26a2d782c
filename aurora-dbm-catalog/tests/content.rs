use aurora_dbm_catalog::{ContentItem, ContentRow, Record};
use aurora_dbm_core::{OfflineField, OnlineCaps, OnlineField, PlayerRange};
use chrono::{TimeZone, Utc};

fn halo_row() -> ContentRow {
    ContentRow {
        id: 1,
        title_id: 0x4D5307E6,
        title_name: "Halo 3".to_string(),
        publisher: "Microsoft Game Studios".to_string(),
        developer: "Bungie".to_string(),
        directory: "\\Hdd1\\Games\\Halo 3".to_string(),
        executable: "default.xex".to_string(),
        disc_num: 0,
        discs_in_set: 2,
        game_caps_online: OnlineCaps::from_bits(0x0201_0000),
        ..Default::default()
    }
}

#[test]
fn freshly_wrapped_row_is_unchanged() {
    let item = ContentItem::from_row(halo_row());
    assert!(!item.is_changed());
    assert_eq!(item.id(), 1);
    assert_eq!(item.title_name(), "Halo 3");
    assert_eq!(item.title_id_hex(), "4D5307E6");
}

#[test]
fn disc_counts_never_read_below_one() {
    let mut row = halo_row();
    row.disc_num = 0;
    row.discs_in_set = -3;
    let item = ContentItem::new(row);
    assert_eq!(item.disc_num(), 1);
    assert_eq!(item.discs_in_set(), 1);
    assert_eq!(item.disc_info(), "1/1");
    // The stored values are untouched.
    assert_eq!(item.row().disc_num, 0);
    assert_eq!(item.row().discs_in_set, -3);
}

#[test]
fn multiplayer_update_rewrites_online_word() {
    let mut item = ContentItem::new(halo_row());
    assert_eq!(item.disc_num(), 1);
    assert_eq!(item.discs_in_set(), 2);
    assert_eq!(item.min_online_multiplayer_players(), 1);
    assert_eq!(item.max_online_multiplayer_players(), 2);

    item.set_max_online_multiplayer_players(4);

    assert_eq!(item.row().game_caps_online.bits(), 0x0401_0000);
    assert_eq!(item.online_multiplayer_players(), PlayerRange::new(1, 4));
    assert!(item.is_changed());
}

#[test]
fn every_setter_marks_changed() {
    let setters: &[(&str, fn(&mut ContentItem))] = &[
        ("title_id", |i: &mut ContentItem| i.set_title_id(1)),
        ("media_id", |i: &mut ContentItem| i.set_media_id(1)),
        ("base_version", |i: &mut ContentItem| i.set_base_version(1)),
        ("title_name", |i: &mut ContentItem| i.set_title_name("x")),
        ("description", |i: &mut ContentItem| i.set_description("x")),
        ("publisher", |i: &mut ContentItem| i.set_publisher("x")),
        ("developer", |i: &mut ContentItem| i.set_developer("x")),
        ("release_date", |i: &mut ContentItem| i.set_release_date("x")),
        ("live_rating", |i: &mut ContentItem| i.set_live_rating(4.5)),
        ("live_raters", |i: &mut ContentItem| i.set_live_raters(10)),
        ("directory", |i: &mut ContentItem| i.set_directory("x")),
        ("disc_num", |i: &mut ContentItem| i.set_disc_num(2)),
        ("discs_in_set", |i: &mut ContentItem| i.set_discs_in_set(2)),
        ("system_link", |i: &mut ContentItem| i.set_system_link(true)),
        ("date_added", |i: &mut ContentItem| i.set_date_added(Utc::now())),
        ("min_offline_players", |i: &mut ContentItem| i.set_min_offline_players(1)),
        ("system_link_players", |i: &mut ContentItem| i.set_offline_system_link_players(8)),
        ("max_online_co_op", |i: &mut ContentItem| i.set_max_online_co_op_players(2)),
    ];

    for &(name, setter) in setters {
        let mut item = ContentItem::new(halo_row());
        setter(&mut item);
        assert!(item.is_changed(), "setter {name} did not mark the item changed");
    }
}

#[test]
fn setting_the_same_value_still_marks_changed() {
    let mut item = ContentItem::new(halo_row());
    item.set_title_name("Halo 3");
    assert!(item.is_changed());
}

#[test]
fn non_finite_rating_is_stored_as_zero() {
    let mut item = ContentItem::new(halo_row());
    item.set_live_rating(f64::NAN);
    assert!(item.is_changed());
    assert_eq!(item.live_rating(), 0.0);

    item.set_live_rating(f64::INFINITY);
    assert_eq!(item.row().live_rating, 0.0);

    item.set_live_rating(4.25);
    assert_eq!(item.live_rating(), 4.25);
}

#[test]
fn mark_saved_clears_changed() {
    let mut item = ContentItem::new(halo_row());
    item.set_publisher("Xbox Game Studios");
    item.mark_saved();
    assert!(!item.is_changed());
    assert_eq!(item.publisher(), "Xbox Game Studios");
}

#[test]
fn offline_setters_leave_other_bytes_alone() {
    let mut item = ContentItem::new(halo_row());
    item.set_max_offline_players(4);
    item.set_min_offline_co_op_players(2);
    item.set_max_offline_co_op_players(2);
    item.set_offline_system_link_players(16);

    assert_eq!(item.min_offline_players(), 1);
    assert_eq!(item.max_offline_players(), 4);
    assert_eq!(item.offline_co_op_players(), PlayerRange::new(2, 2));
    assert_eq!(item.offline_system_link_players(), 16);
    assert_eq!(item.offline_caps_player(OfflineField::SystemLink), 16);
    assert_eq!(item.row().game_caps_offline.bits(), 0x0000_1000_0202_0400);
    // The online word is independent.
    assert_eq!(item.online_caps_player(OnlineField::MultiplayerMax), 2);
}

#[test]
fn date_added_is_stored_as_filetime() {
    let mut item = ContentItem::new(halo_row());
    let date = Utc.with_ymd_and_hms(2015, 5, 25, 0, 0, 0).unwrap();
    item.set_date_added(date);
    assert_eq!(item.row().date_added, 130_769_856_000_000_000);
    assert_eq!(item.date_added(), date);
}
