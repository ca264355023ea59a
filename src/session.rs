use crate::catalog::{ItemCatalog, ZoneCatalog};
use crate::creature::CreatureInst;
use crate::encounter::{
    execute_commands, ActiveEncounter, EncounterKind, EncounterScheduler, GameSignal,
    SchedulerConfig, SchedulerEvent,
};
use crate::equipment;
use crate::errors::{CatalogError, EconomyError, EncounterError, GameResult, PersistenceError};
use crate::progression;
use crate::rng::RollRng;
use crate::stats;
use crate::trainer::Trainer;
use schema::{ElementType, EvolutionStage, GearSlot, ItemEffect, MonsterStats, StatKind};
use serde::{Deserialize, Serialize};

/// Whether the player is free in the world or parked in an overlay. The
/// encounter scheduler only rolls while exploring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    Exploring,
    Menu,
}

/// The persisted portion of a session. Encounters are ephemeral and never
/// serialized; a loaded game always starts idle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub trainer: Trainer,
    pub roster: Vec<CreatureInst>,
    pub active_creature: usize,
    pub next_creature_id: u32,
}

/// Projection of the active creature for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderView {
    pub creature_id: u32,
    pub name: String,
    pub element: ElementType,
    pub stage: EvolutionStage,
    pub level: u32,
    pub current_hp: u32,
    pub effective_max_hp: u32,
    pub effective_attack: u32,
    pub effective_defense: u32,
    pub effective_speed: u32,
    pub equipment: Vec<(GearSlot, String)>,
}

/// One game session: the trainer, the creature roster, the injected
/// catalogs, and the encounter machinery. Every mutation flows through a
/// method here, and all timed behavior is advanced by `advance(now)` from a
/// single dispatch point, so there is no shared ambient state and nothing
/// for a stale timer to write into.
#[derive(Debug)]
pub struct GameSession {
    trainer: Trainer,
    roster: Vec<CreatureInst>,
    active_creature: usize,
    next_creature_id: u32,
    mode: SessionMode,
    item_catalog: ItemCatalog,
    zone_catalog: ZoneCatalog,
    scheduler: EncounterScheduler,
    encounter: Option<ActiveEncounter>,
}

impl GameSession {
    pub fn new(
        trainer: Trainer,
        starter: CreatureInst,
        item_catalog: ItemCatalog,
        zone_catalog: ZoneCatalog,
    ) -> Self {
        Self::with_config(
            trainer,
            starter,
            item_catalog,
            zone_catalog,
            SchedulerConfig::default(),
        )
    }

    pub fn with_config(
        trainer: Trainer,
        starter: CreatureInst,
        item_catalog: ItemCatalog,
        zone_catalog: ZoneCatalog,
        config: SchedulerConfig,
    ) -> Self {
        let next_creature_id = starter.id + 1;
        GameSession {
            trainer,
            roster: vec![starter],
            active_creature: 0,
            next_creature_id,
            mode: SessionMode::Exploring,
            item_catalog,
            zone_catalog,
            scheduler: EncounterScheduler::new(config),
            encounter: None,
        }
    }

    // === Accessors ===

    pub fn trainer(&self) -> &Trainer {
        &self.trainer
    }

    pub fn roster(&self) -> &[CreatureInst] {
        &self.roster
    }

    pub fn active_creature(&self) -> &CreatureInst {
        &self.roster[self.active_creature]
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: SessionMode) {
        self.mode = mode;
    }

    pub fn encounter_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn item_catalog(&self) -> &ItemCatalog {
        &self.item_catalog
    }

    pub fn zone_catalog(&self) -> &ZoneCatalog {
        &self.zone_catalog
    }

    /// Equipment-inclusive stat view for the render/decision cycle.
    pub fn effective_stat(&self, stat: StatKind) -> u32 {
        stats::effective_stat(self.active_creature(), stat, &self.item_catalog)
    }

    pub fn render_view(&self) -> RenderView {
        let creature = self.active_creature();
        RenderView {
            creature_id: creature.id,
            name: creature.name.clone(),
            element: creature.element,
            stage: creature.stage,
            level: creature.level,
            current_hp: creature.current_hp,
            effective_max_hp: self.effective_stat(StatKind::MaxHp),
            effective_attack: self.effective_stat(StatKind::Attack),
            effective_defense: self.effective_stat(StatKind::Defense),
            effective_speed: self.effective_stat(StatKind::Speed),
            equipment: creature
                .equipment
                .iter()
                .map(|(slot, item_id)| (*slot, item_id.clone()))
                .collect(),
        }
    }

    // === The dispatch point ===

    /// Advance all timed behavior to `now` (milliseconds on any monotonic
    /// clock). This is the only place encounters are scheduled, revealed,
    /// and committed; the caller drives it from its frame or timer loop and
    /// renders the returned signals.
    pub fn advance(&mut self, now: u64, rng: &mut RollRng) -> Vec<GameSignal> {
        let mut signals = Vec::new();

        let Some(zone) = self.zone_catalog.get(&self.trainer.location).cloned() else {
            return signals;
        };

        let explorable = self.mode == SessionMode::Exploring && self.encounter.is_none();
        if let Some(event) = self.scheduler.tick(now, explorable, &zone, rng) {
            match event {
                SchedulerEvent::Cue { kind } => {
                    signals.push(GameSignal::PreEventCue {
                        kind,
                        emote: kind.emote_key().to_string(),
                    });
                }
                SchedulerEvent::Fire { kind } => {
                    let creature = self.active_creature();
                    let encounter = ActiveEncounter::open(
                        kind,
                        now,
                        &zone,
                        &creature.name,
                        self.trainer.level,
                        creature.level,
                        &self.item_catalog,
                        rng,
                    );
                    signals.push(GameSignal::EncounterOpened {
                        kind: encounter.kind(),
                    });
                    self.encounter = Some(encounter);
                }
            }
        }

        if let Some(mut encounter) = self.encounter.take() {
            let player = stats::combat_snapshot(self.active_creature(), &self.item_catalog);
            let step = encounter.advance(now, &player, &zone, &self.item_catalog, rng);
            signals.extend(step.signals);

            if !step.commands.is_empty() {
                let creature = &mut self.roster[self.active_creature];
                signals.extend(execute_commands(&step.commands, &mut self.trainer, creature));
            }

            if step.closed {
                signals.push(GameSignal::EncounterClosed {
                    kind: encounter.kind(),
                });
                self.scheduler.finish(now);
            } else {
                self.encounter = Some(encounter);
            }
        }

        signals
    }

    /// Stage an encounter on demand (debug menu, scripted beat). Fails with
    /// `Busy` while one is already pending.
    pub fn trigger_encounter(&mut self, now: u64, kind: EncounterKind) -> GameResult<()> {
        self.scheduler.trigger(now, kind)
    }

    /// Abandon whatever encounter is staged or in flight, e.g. because the
    /// player navigated away. Because all timing lives in session state,
    /// this also cancels every pending reveal and commit; nothing can write
    /// into the session afterwards.
    pub fn abandon_encounter(&mut self, now: u64) {
        self.encounter = None;
        self.scheduler.finish(now);
    }

    // === Player operations ===

    pub fn equip(&mut self, slot: GearSlot, item_id: &str) -> GameResult<()> {
        let creature = &mut self.roster[self.active_creature];
        equipment::equip(&mut self.trainer, creature, slot, item_id, &self.item_catalog)
    }

    pub fn unequip(&mut self, slot: GearSlot) -> GameResult<String> {
        let creature = &mut self.roster[self.active_creature];
        equipment::unequip(&mut self.trainer, creature, slot)
    }

    /// Use a held consumable on the active creature.
    pub fn use_consumable(&mut self, item_id: &str) -> GameResult<Vec<GameSignal>> {
        let def = self
            .item_catalog
            .get(item_id)
            .ok_or_else(|| EconomyError::UnknownItem(item_id.to_string()))?;
        let effect = def
            .effect
            .ok_or_else(|| EconomyError::NotConsumable(item_id.to_string()))?;
        if !self.trainer.has_item(item_id) {
            return Err(EconomyError::NotInInventory(item_id.to_string()).into());
        }

        self.trainer.remove_item(item_id);
        let creature = &mut self.roster[self.active_creature];
        let mut signals = Vec::new();
        match effect {
            ItemEffect::RestoreHp(amount) => {
                creature.heal(amount);
            }
            ItemEffect::RestoreHpFull => {
                creature.heal_full();
            }
            ItemEffect::GrantExp(amount) => {
                let report = progression::apply_experience(creature, amount);
                signals.push(GameSignal::ExpGained { amount });
                if report.leveled_up() {
                    signals.push(GameSignal::CreatureLeveledUp {
                        level: report.new_level,
                    });
                    if progression::can_evolve(creature) {
                        signals.push(GameSignal::EvolutionReady);
                    }
                }
            }
        }
        Ok(signals)
    }

    pub fn purchase(&mut self, item_id: &str) -> GameResult<()> {
        let def = self
            .item_catalog
            .get(item_id)
            .ok_or_else(|| EconomyError::UnknownItem(item_id.to_string()))?;
        self.trainer.purchase(def)
    }

    /// Move to a connected, unlocked zone. Travel is refused while an
    /// encounter is staged or in flight; abandon it first.
    pub fn travel(&mut self, zone_id: &str) -> GameResult<()> {
        if self.scheduler.is_pending() {
            return Err(EncounterError::Busy.into());
        }
        let destination = self.zone_catalog.require(zone_id)?;
        let current = self.zone_catalog.require(&self.trainer.location)?;
        if !current.connections.contains(&destination.id) {
            return Err(CatalogError::NotConnected {
                from: current.id.clone(),
                to: destination.id.clone(),
            }
            .into());
        }
        if self.trainer.level < destination.unlock_level {
            return Err(CatalogError::ZoneLocked {
                zone: destination.id.clone(),
                required: destination.unlock_level,
            }
            .into());
        }
        self.trainer.location = destination.id.clone();
        Ok(())
    }

    /// Evolve the active creature, optionally applying a re-skinned form
    /// record from the content collaborator.
    pub fn evolve_active(
        &mut self,
        new_form: Option<&MonsterStats>,
    ) -> GameResult<EvolutionStage> {
        let creature = &mut self.roster[self.active_creature];
        let stage = progression::evolve(creature)?;
        if let Some(record) = new_form {
            creature.apply_form(record);
        }
        Ok(stage)
    }

    /// Register a freshly generated creature and return its id.
    pub fn add_creature(&mut self, record: &MonsterStats) -> u32 {
        let id = self.next_creature_id;
        self.next_creature_id += 1;
        self.roster.push(CreatureInst::from_monster_stats(id, record));
        id
    }

    /// Switch the active creature. Returns false and changes nothing for an
    /// out-of-range index.
    pub fn set_active_creature(&mut self, index: usize) -> bool {
        if index < self.roster.len() {
            self.active_creature = index;
            true
        } else {
            false
        }
    }

    // === Persistence boundary ===

    pub fn snapshot(&self) -> GameResult<String> {
        let snapshot = SessionSnapshot {
            trainer: self.trainer.clone(),
            roster: self.roster.clone(),
            active_creature: self.active_creature,
            next_creature_id: self.next_creature_id,
        };
        serde_json::to_string(&snapshot)
            .map_err(|e| PersistenceError::Encode(e.to_string()).into())
    }

    pub fn restore(
        blob: &str,
        item_catalog: ItemCatalog,
        zone_catalog: ZoneCatalog,
        config: SchedulerConfig,
    ) -> GameResult<Self> {
        let snapshot: SessionSnapshot =
            serde_json::from_str(blob).map_err(|e| PersistenceError::Decode(e.to_string()))?;

        if snapshot.roster.is_empty() {
            return Err(PersistenceError::Inconsistent("empty roster".to_string()).into());
        }
        if snapshot.active_creature >= snapshot.roster.len() {
            return Err(PersistenceError::Inconsistent(format!(
                "active creature index {} out of range",
                snapshot.active_creature
            ))
            .into());
        }
        if zone_catalog.get(&snapshot.trainer.location).is_none() {
            return Err(PersistenceError::Inconsistent(format!(
                "unknown zone {}",
                snapshot.trainer.location
            ))
            .into());
        }
        for creature in &snapshot.roster {
            if creature.current_hp > creature.max_hp() {
                return Err(PersistenceError::Inconsistent(format!(
                    "creature {} has HP above its maximum",
                    creature.id
                ))
                .into());
            }
        }

        Ok(GameSession {
            trainer: snapshot.trainer,
            roster: snapshot.roster,
            active_creature: snapshot.active_creature,
            next_creature_id: snapshot.next_creature_id,
            mode: SessionMode::Exploring,
            item_catalog,
            zone_catalog,
            scheduler: EncounterScheduler::new(config),
            encounter: None,
        })
    }
}
