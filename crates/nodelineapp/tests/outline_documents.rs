use nodelineapp::api::Destination;
use nodelineapp::content::ContentManager;
use nodelineapp::error::NodelineError;
use nodelineapp::hierarchy::DiffAction;
use nodelineapp::model::Item;
use nodelineapp::outline::RenderOptions;

const GROCERIES: &str = "Groceries\n\tDairy\n\t\tMilk @done\n\t\tCheese\n\tBread\nChores\n\tLaundry @done";

fn load(text: &str) -> ContentManager {
    let mut manager = ContentManager::new(RenderOptions::default());
    manager.read(text.as_bytes(), "public.plain-text").unwrap();
    manager
}

fn save(manager: &ContentManager) -> String {
    String::from_utf8(manager.data("txt").unwrap()).unwrap()
}

#[test]
fn test_canonical_document_round_trips() {
    let manager = load(GROCERIES);
    assert_eq!(manager.api().total_count(), 7);
    assert_eq!(save(&manager), GROCERIES);
}

#[test]
fn test_messy_indentation_is_normalized_on_save() {
    let messy = "    Groceries\n\t\t\tMilk\n  Eggs @done  \n\nChores";
    let manager = load(messy);
    assert_eq!(save(&manager), "Groceries\n\tMilk\n\tEggs @done\n\nChores");
}

#[test]
fn test_paths_address_loaded_items() {
    let manager = load(GROCERIES);
    let api = manager.api();

    let milk = api.resolve_selectors(&["1.1.1"]).unwrap()[0];
    assert_eq!(api.get(milk).unwrap().text, "Milk");
    assert!(api.get(milk).unwrap().done);

    let dairy_children = api.resolve_selectors(&["1.1.1-1.1.2"]).unwrap();
    let texts: Vec<&str> = dairy_children
        .iter()
        .map(|id| api.get(*id).unwrap().text.as_str())
        .collect();
    assert_eq!(texts, vec!["Milk", "Cheese"]);
}

#[test]
fn test_edit_then_save() {
    let mut manager = load(GROCERIES);
    let api = manager.api_mut();

    let bread = api.resolve_selectors(&["1.2"]).unwrap()[0];
    let chores = api.resolve_selectors(&["2"]).unwrap()[0];

    let actions = api.move_items(&[bread], Destination::IntoTarget { target: chores, offset: 0 }).unwrap();
    assert_eq!(actions.len(), 2);
    assert!(matches!(actions[0], DiffAction::Removed { .. }));
    assert!(matches!(actions[1], DiffAction::Inserted { .. }));

    let actions = api.add_items(vec![Item::new("Butter")], Destination::OnTarget(bread)).unwrap();
    assert_eq!(actions[0], DiffAction::Updated { id: bread });

    assert_eq!(
        save(&manager),
        "Groceries\n\tDairy\n\t\tMilk @done\n\t\tCheese\nChores\n\tBread\n\t\tButter\n\tLaundry @done"
    );
}

#[test]
fn test_remove_whole_branch() {
    let mut manager = load(GROCERIES);
    let api = manager.api_mut();
    let targets = api.resolve_selectors(&["1.1", "1.1.2"]).unwrap();

    let actions = api.remove_items(&targets).unwrap();

    assert_eq!(actions.len(), 1);
    assert_eq!(api.total_count(), 4);
    assert_eq!(save(&manager), "Groceries\n\tBread\nChores\n\tLaundry @done");
}

#[test]
fn test_cyclic_move_is_refused() {
    let mut manager = load(GROCERIES);
    let api = manager.api_mut();
    let groceries = api.resolve_selectors(&["1"]).unwrap()[0];
    let milk = api.resolve_selectors(&["1.1.1"]).unwrap()[0];

    assert!(!api.can_move(&[groceries], Some(milk)).unwrap());
    let err = api.move_items(&[groceries], Destination::OnTarget(milk)).unwrap_err();
    assert!(matches!(err, NodelineError::CyclicMove(_)));
    assert_eq!(save(&manager), GROCERIES);
}

#[test]
fn test_unknown_type_names() {
    let mut manager = ContentManager::default();
    assert!(matches!(
        manager.read(b"x", "com.example.outline"),
        Err(NodelineError::UnknownFormat(_))
    ));
    assert!(matches!(
        manager.data("opml"),
        Err(NodelineError::UnsupportedFormat(_))
    ));
}
