use folio_storage::{InMemoryStore, KeyValueStore};
use folio_types::{FieldName, NotificationKind, Theme, keys};
use folio_view::nav::{MenuEvent, MenuState};
use folio_view::reveal::{RevealEffect, WatchSpec};
use folio_view::scroll::SectionBounds;
use folio_view::theme::SystemScheme;
use folio_view::{Environment, Portfolio, SiteConfig};
use std::collections::BTreeMap;

fn sections() -> Vec<SectionBounds> {
    vec![
        SectionBounds::new("home", 0.0, 500.0),
        SectionBounds::new("about", 500.0, 700.0),
        SectionBounds::new("skills", 1200.0, 600.0),
    ]
}

fn page(env: &Environment) -> Portfolio<InMemoryStore> {
    Portfolio::load(SiteConfig::default(), InMemoryStore::default(), env)
}

fn dark_system() -> Environment {
    Environment {
        system_scheme: SystemScheme::Dark,
        local_hour: 12,
        ..Environment::default()
    }
}

#[test]
fn edits_and_theme_survive_reload() -> anyhow::Result<()> {
    let store = InMemoryStore::default();
    let mut page = Portfolio::load(SiteConfig::default(), store.clone(), &dark_system());
    assert_eq!(page.theme(), Theme::Dark);

    let (theme, notification) = page.toggle_theme();
    assert_eq!(theme, Theme::Light);
    assert_eq!(notification.kind, NotificationKind::Success);

    assert!(page.enable_editing().is_some());
    assert!(page.enable_editing().is_none());
    page.set_draft(FieldName::Occupation, "Engineer");
    page.set_draft(FieldName::Name, "");
    let (outcome, _) = page.save_changes().expect("editing was enabled");
    assert_eq!(outcome.reset_to_default, vec![FieldName::Name]);

    let reloaded = Portfolio::load(SiteConfig::default(), store.clone(), &dark_system());
    assert_eq!(reloaded.theme(), Theme::Light);
    assert_eq!(reloaded.editor().value(FieldName::Occupation), "Engineer");
    assert_eq!(reloaded.editor().value(FieldName::Name), FieldName::Name.default_text());

    let raw = store.get_item(keys::PERSONAL_DATA).expect("mapping persisted");
    let stored: BTreeMap<String, String> = serde_json::from_str(&raw)?;
    assert_eq!(stored["occupation"], "Engineer");
    assert_eq!(stored["name"], FieldName::Name.default_text());
    Ok(())
}

#[test]
fn throttled_scroll_drives_navigation() {
    let mut page = page(&Environment::default());
    page.set_sections(sections());

    let timer = page.push_scroll(50.0).expect("first sample arms");
    assert!(page.push_scroll(320.0).is_none());
    assert!(page.push_scroll(600.0).is_none());
    let view = page
        .fire_scroll(timer.ticket, sections)
        .expect("pending sample delivered");

    assert_eq!(view.scroll_y, 600.0);
    assert!(view.scrolled);
    assert_eq!(view.active_section.as_deref(), Some("about"));
    assert_eq!(page.nav().active_link(), Some("about"));

    assert_eq!(page.click_nav_link("skills"), Some(1130.0));
    assert_eq!(page.nav().active_link(), Some("skills"));
    assert_eq!(page.click_nav_link("blog"), None);
}

#[test]
fn menu_closes_on_debounced_desktop_resize() {
    let mut page = page(&Environment::default());
    assert!(page.menu_event(MenuEvent::HamburgerClick));

    let early = page.push_resize(900.0).expect("arms");
    let late = page.push_resize(1200.0).expect("re-arms");
    assert!(!page.fire_resize(early.ticket));
    assert_eq!(page.nav().menu(), MenuState::Open);
    assert!(page.fire_resize(late.ticket));
    assert_eq!(page.nav().menu(), MenuState::Closed);
}

#[test]
fn upload_validation_and_persistence() {
    let store = InMemoryStore::default();
    let env = Environment::default();
    let mut page = Portfolio::load(SiteConfig::default(), store.clone(), &env);

    let rejected = page
        .check_upload("image/jpeg", 6 * 1024 * 1024)
        .expect_err("6MB is over the limit");
    assert_eq!(rejected.kind, NotificationKind::Error);
    assert!(page.profile_image().is_none());
    assert!(store.get_item(keys::PROFILE_IMAGE).is_none());

    let bytes = vec![7_u8; 2048];
    assert!(page.check_upload("image/png", bytes.len() as u64).is_ok());
    let (uri, notification) = page
        .store_profile_image("image/png", &bytes)
        .expect("small png accepted");
    assert_eq!(notification.kind, NotificationKind::Success);
    assert!(uri.as_str().starts_with("data:image/png;base64,"));
    assert_eq!(store.get_item(keys::PROFILE_IMAGE).as_deref(), Some(uri.as_str()));

    let reloaded = Portfolio::load(SiteConfig::default(), store, &env);
    assert_eq!(reloaded.profile_image(), Some(&uri));
}

#[test]
fn reveal_fires_once_per_element() {
    let mut page = page(&Environment::default());
    let reveal = page.reveal_mut();
    reveal.watch("counter-repos", WatchSpec::Counter { target: 20 });

    assert_eq!(
        reveal.on_intersect("counter-repos", true),
        Some(RevealEffect::Count { target: 20 })
    );
    assert_eq!(reveal.on_intersect("counter-repos", true), None);
    assert!(page.reveal().is_triggered("counter-repos"));
}

#[test]
fn scroll_sample_uses_layout_at_fire_time() {
    let mut page = page(&Environment::default());
    page.set_sections(sections());

    // The about section grows (e.g. edit inputs) between arming and firing.
    let timer = page.push_scroll(1150.0).expect("first sample arms");
    let view = page
        .fire_scroll(timer.ticket, || {
            vec![
                SectionBounds::new("home", 0.0, 500.0),
                SectionBounds::new("about", 500.0, 900.0),
                SectionBounds::new("skills", 1400.0, 600.0),
            ]
        })
        .expect("pending sample delivered");
    assert_eq!(view.active_section.as_deref(), Some("about"));

    let timer = page.push_scroll(1320.0).expect("re-armed after delivery");
    let view = page
        .fire_scroll(timer.ticket, sections)
        .expect("pending sample delivered");
    assert_eq!(view.active_section.as_deref(), Some("skills"));
    assert_eq!(page.nav().active_link(), Some("skills"));
}

#[test]
fn stale_scroll_ticket_skips_measurement() {
    let mut page = page(&Environment::default());
    let timer = page.push_scroll(10.0).expect("arms");
    assert!(page.fire_scroll(timer.ticket, sections).is_some());
    let view = page.fire_scroll(timer.ticket, || -> Vec<SectionBounds> {
        panic!("layout must not be measured for a stale ticket")
    });
    assert!(view.is_none());
}
