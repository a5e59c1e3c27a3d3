//! Integration tests for channels and audiences
//!
//! Three players in the keep's hall and yard, plus one in a tower of
//! another area.

use wayfarer_engine::{
    Audience, AudienceTargets, ChannelOutcome, ChannelRegistry, Delivery, Sender, WitnessLedger,
    resolve_channel,
};
use wayfarer_foundation::{EntityId, ErrorKind, ItemType, Role};
use wayfarer_storage::{Character, Item, ItemLocation, World};

struct Town {
    world: World,
    registry: ChannelRegistry,
    hall: EntityId,
    alice: EntityId,
    bob: EntityId,
    carol: EntityId,
    dave: EntityId,
}

impl Town {
    fn new() -> Self {
        let mut world = World::new();
        let hall = world.create_room("Hall", "keep");
        let yard = world.create_room("Yard", "keep");
        let tower = world.create_room("Tower", "wizardry");

        let mut player = |name: &str, role, room| {
            let id = world.create_character(name, Character::player(role));
            world.place_character(id, room).unwrap();
            world.connect(id).unwrap();
            id
        };
        let alice = player("Alice", Role::Player, hall);
        let bob = player("Bob", Role::Player, hall);
        let carol = player("Carol", Role::Builder, yard);
        let dave = player("Dave", Role::Admin, tower);
        Self {
            world,
            registry: ChannelRegistry::standard(),
            hall,
            alice,
            bob,
            carol,
            dave,
        }
    }

    fn send(&self, channel: &str, sender: EntityId, message: &str) -> ChannelOutcome {
        resolve_channel(
            &self.registry,
            &self.world,
            channel,
            Sender::Actor(sender),
            message,
        )
        .unwrap()
    }

    fn radio(&mut self, holder: EntityId) {
        let radio = self.world.create_item(
            "a radio",
            Item::new(ItemType::Communicator).with_prototype("radio"),
        );
        self.world
            .transfer_item(radio, ItemLocation::Inventory(holder))
            .unwrap();
    }
}

fn sent(outcome: ChannelOutcome) -> Vec<Delivery> {
    match outcome {
        ChannelOutcome::Sent(lines) => lines,
        other => panic!("expected lines, got {other:?}"),
    }
}

// =============================================================================
// Room and Area
// =============================================================================

#[test]
fn say_reaches_the_room_only() {
    let town = Town::new();
    let lines = sent(town.send("'", town.alice, "hello"));
    assert_eq!(
        lines,
        vec![
            Delivery::new(town.alice, "You say, \"hello\""),
            Delivery::new(town.bob, "Alice says, \"hello\""),
        ]
    );
}

#[test]
fn yell_names_the_speaker_only_nearby() {
    let town = Town::new();
    let lines = sent(town.send("yell", town.alice, "fire"));
    assert_eq!(
        lines,
        vec![
            Delivery::new(town.alice, "You yell, \"fire\""),
            Delivery::new(town.bob, "Alice yells, \"fire\""),
            Delivery::new(town.carol, "Someone yells, \"fire\""),
        ]
    );
}

#[test]
fn empty_audiences_still_echo_to_the_sender() {
    let town = Town::new();
    let lines = sent(town.send("say", town.dave, "anyone?"));
    assert_eq!(lines, vec![Delivery::new(town.dave, "You say, \"anyone?\"")]);
}

// =============================================================================
// Private and Whisper
// =============================================================================

#[test]
fn tell_reaches_anyone_connected() {
    let town = Town::new();
    let lines = sent(town.send("tell", town.alice, "DAVE meet me"));
    assert_eq!(
        lines,
        vec![
            Delivery::new(town.alice, "You OOCly tell Dave, \"meet me\""),
            Delivery::new(town.dave, "Alice OOCly tells you, \"meet me\""),
        ]
    );
}

#[test]
fn whisper_is_witnessed_by_the_room() {
    let mut town = Town::new();
    let eve = town
        .world
        .create_character("Eve", Character::player(Role::Player));
    town.world.place_character(eve, town.hall).unwrap();
    town.world.connect(eve).unwrap();

    let lines = sent(town.send("whisper", town.alice, "bob the password is swordfish"));
    assert_eq!(
        lines,
        vec![
            Delivery::new(eve, "Alice whispers something to Bob."),
            Delivery::new(town.alice, "You whisper to Bob, \"the password is swordfish\""),
            Delivery::new(town.bob, "Alice whispers to you, \"the password is swordfish\""),
        ]
    );
}

#[test]
fn whisper_across_rooms_reaches_nobody() {
    let town = Town::new();
    let targets = Audience::Whisper
        .compute_targets(
            &town.world,
            Sender::Actor(town.alice),
            "carol psst",
            &mut WitnessLedger::new(),
        )
        .unwrap();
    assert_eq!(
        targets,
        AudienceTargets::Recipients {
            targets: Vec::new(),
            witnesses: Vec::new(),
            message: "psst".to_string(),
            communicator: None,
        }
    );

    // Bob is in the hall too, but a failed whisper is not witnessed.
    assert_eq!(
        sent(town.send("whisper", town.alice, "carol psst")),
        [Delivery::new(town.alice, "You whisper to Carol, \"psst\"")]
    );
}

#[test]
fn addressing_yourself() {
    let town = Town::new();
    assert_eq!(
        town.send("whisper", town.alice, "me note to self"),
        ChannelOutcome::SelfTarget(Delivery::new(
            town.alice,
            "You whisper to yourself, \"note to self\""
        ))
    );
    assert_eq!(
        town.send("tell", town.alice, "alice hi"),
        ChannelOutcome::SelfTarget(Delivery::new(town.alice, "You OOCly tell yourself, \"hi\""))
    );
}

#[test]
fn targeted_channels_need_a_target_and_a_message() {
    let town = Town::new();
    assert_eq!(
        town.send("tell", town.alice, "zed hi"),
        ChannelOutcome::NoTarget {
            name: "zed".to_string()
        }
    );
    assert_eq!(town.send("tell", town.alice, "bob"), ChannelOutcome::NoMessage);
    assert_eq!(town.send("tell", town.alice, "   "), ChannelOutcome::NoMessage);
}

#[test]
fn witnesses_see_each_event_once_per_ledger() {
    let town = Town::new();
    let mut ledger = WitnessLedger::new();
    // Bob is the target, so nobody else in the hall is left to witness.
    let targets = Audience::Whisper
        .compute_targets(&town.world, Sender::Actor(town.alice), "bob hi", &mut ledger)
        .unwrap();
    assert!(matches!(
        targets,
        AudienceTargets::Recipients { ref witnesses, .. } if witnesses.is_empty()
    ));

    assert!(ledger.first_sighting(town.carol, "whisper:bob:hi"));
    assert!(!ledger.first_sighting(town.carol, "whisper:bob:hi"));
    assert!(ledger.first_sighting(town.dave, "whisper:bob:hi"));
}

// =============================================================================
// Party Communicators
// =============================================================================

#[test]
fn gtell_reaches_linked_party_members() {
    let mut town = Town::new();
    town.radio(town.alice);
    town.radio(town.carol);
    let party = town.world.form_party(town.alice).unwrap();
    town.world.join_party(party, town.carol).unwrap();
    town.world.join_party(party, town.dave).unwrap();

    let lines = sent(town.send("gtell", town.alice, "regroup"));
    assert_eq!(
        lines,
        vec![
            Delivery::new(town.bob, "Alice says into their radio, \"regroup.\""),
            Delivery::new(town.alice, "You say into your radio, \"regroup\""),
            Delivery::new(town.carol, "Alice says through your radio, \"regroup\""),
        ]
    );
}

#[test]
fn gtell_needs_a_party_and_a_communicator() {
    let mut town = Town::new();
    assert_eq!(town.send("gtell", town.alice, "hi"), ChannelOutcome::NoParty);

    town.world.form_party(town.alice).unwrap();
    assert_eq!(town.send("gtell", town.alice, "hi"), ChannelOutcome::NoCommunicator);
}

// =============================================================================
// Roles and the System Sender
// =============================================================================

#[test]
fn role_channels_check_the_sender() {
    let town = Town::new();
    assert_eq!(
        town.send("admin", town.carol, "hi"),
        ChannelOutcome::NotPermitted {
            required: Role::Admin
        }
    );

    let lines = sent(town.send("builder", town.carol, "new area up"));
    assert_eq!(
        lines,
        vec![
            Delivery::new(town.carol, "[BUILDER] Carol: new area up"),
            Delivery::new(town.dave, "[BUILDER] Carol: new area up"),
        ]
    );
}

#[test]
fn system_messages_are_verbatim() {
    let town = Town::new();
    let lines = sent(
        resolve_channel(
            &town.registry,
            &town.world,
            "ooc",
            Sender::System,
            "Reboot in 5 minutes.",
        )
        .unwrap(),
    );
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|line| line.text == "Reboot in 5 minutes."));
    assert_eq!(lines[0].recipient, town.alice);
}

#[test]
fn system_cannot_speak_in_a_room() {
    let town = Town::new();
    let err = resolve_channel(&town.registry, &town.world, "say", Sender::System, "hi")
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Internal(_)));
}

#[test]
fn unknown_channels() {
    let town = Town::new();
    assert_eq!(town.send("gossip", town.alice, "hi"), ChannelOutcome::UnknownChannel);
}

#[test]
fn only_connected_players_listen() {
    let mut town = Town::new();
    town.world.disconnect(town.bob);
    let lines = sent(town.send("ooc", town.alice, "quiet tonight"));
    let recipients: Vec<EntityId> = lines.iter().map(|line| line.recipient).collect();
    assert_eq!(recipients, vec![town.alice, town.carol, town.dave]);
    assert_eq!(lines[1].text, "[OOC] Alice: quiet tonight");
}
