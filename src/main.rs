use creature_quest::{
    CreatureInst, ElementType, GameSession, GameSignal, ItemCatalog, MonsterStats, RollRng,
    Trainer, ZoneCatalog,
};
use std::path::Path;
use tokio::time::{sleep, Duration, Instant};

/// Demo driver: wires the catalogs and a starter creature into a session,
/// then plays the part of the UI shell by ticking the dispatch loop and
/// printing every signal the engine emits.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let data_path = Path::new("data");

    let item_catalog = match ItemCatalog::load(data_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            println!("Error loading item catalog: {}", e);
            return;
        }
    };
    let zone_catalog = match ZoneCatalog::load(data_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            println!("Error loading zone catalog: {}", e);
            return;
        }
    };
    println!(
        "Loaded {} items and {} zones",
        item_catalog.len(),
        zone_catalog.len()
    );

    // Stand-in for the content-generation collaborator.
    let starter_record = MonsterStats {
        name: "Mossling".to_string(),
        element: Some(ElementType::Verdant),
        body: None,
        hp: Some(60),
        attack: Some(14),
        defense: Some(12),
        speed: Some(10),
        description: Some("A moss-backed hatchling, curious and stubborn.".to_string()),
        ability: Some("Rootgrip".to_string()),
    };
    let starter = CreatureInst::from_monster_stats(1, &starter_record);
    let trainer = Trainer::new("Rowan".to_string(), "meadow".to_string());

    let mut session = GameSession::new(trainer, starter, item_catalog, zone_catalog);
    let mut rng = RollRng::new_random();

    let view = session.render_view();
    println!(
        "{} sets out with {} (Lv.{}, {} HP)",
        session.trainer().name,
        view.name,
        view.level,
        view.current_hp
    );
    println!();

    // Tick the dispatch point for a couple of minutes of exploration.
    let start = Instant::now();
    loop {
        let now = start.elapsed().as_millis() as u64;
        if now > 120_000 {
            break;
        }

        for signal in session.advance(now, &mut rng) {
            print_signal(&signal);
        }
        sleep(Duration::from_millis(250)).await;
    }

    let view = session.render_view();
    println!();
    println!("--- End of stroll ---");
    println!(
        "{}: Lv.{} trainer, {} coins | {} at Lv.{} ({}/{} HP)",
        session.trainer().name,
        session.trainer().level,
        session.trainer().coins,
        view.name,
        view.level,
        view.current_hp,
        view.effective_max_hp
    );

    match session.snapshot() {
        Ok(blob) => println!("Snapshot: {} bytes", blob.len()),
        Err(e) => println!("Snapshot failed: {}", e),
    }
}

fn print_signal(signal: &GameSignal) {
    match signal {
        GameSignal::PreEventCue { emote, .. } => println!("[{}] ...something stirs", emote),
        GameSignal::EncounterOpened { kind } => println!("== {} encounter ==", kind),
        GameSignal::LogLine(line) => println!("  {}", line),
        GameSignal::EncounterClosed { .. } => println!("== encounter over =="),
        GameSignal::ExpGained { amount } => println!("  +{} exp", amount),
        GameSignal::CreatureLeveledUp { level } => println!("  Level up! Now Lv.{}", level),
        GameSignal::TrainerLeveledUp { level } => println!("  Trainer reached Lv.{}", level),
        GameSignal::EvolutionReady => println!("  Evolution is ready!"),
        GameSignal::ItemReceived { item_id } => println!("  Obtained: {}", item_id),
        GameSignal::CoinsReceived { amount } => println!("  +{} coins", amount),
        GameSignal::CreatureDamaged { amount, remaining_hp } => {
            println!("  Took {} damage ({} HP left)", amount, remaining_hp)
        }
    }
}
