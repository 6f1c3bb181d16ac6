//! A two-seat game session.
//!
//! `Game` owns every piece of a running game and exposes the outward
//! action surface. Human (or remotely mirrored) seats act through the
//! `request_*` methods; the computer seat acts from timer callbacks run by
//! [`Game::tick`]. Both go through the same `TurnFlow` entry points.

use std::time::Duration;

use im::Vector;
use log::{debug, info, warn};

use crate::agent::{Decision, DecisionAgent, DecisionContext};
use crate::cards::{Card, CardKind, Color, Hand};
use crate::core::{
    Action, ActionRecord, ConfigError, GameConfig, GameRng, GameState, InteractionMode, LegalMoves,
    RuleError, Seat, SeatMap, StateChange, Status, TurnOwner,
};
use crate::effects::Resolution;
use crate::flow::{FlowEnv, Task, TimerId, Timers, TurnContext, TurnFlow, TurnScheduler};
use crate::zones::{Deck, PileDeck};

/// Who plays a seat.
#[derive(Debug)]
pub enum Occupant {
    /// Driven from outside through the `request_*` methods.
    Human(Hand),
    /// Driven by the computer on timer callbacks.
    Agent(DecisionAgent),
}

impl Occupant {
    #[must_use]
    pub fn hand(&self) -> &Hand {
        match self {
            Occupant::Human(hand) => hand,
            Occupant::Agent(agent) => agent.hand(),
        }
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        match self {
            Occupant::Human(hand) => hand,
            Occupant::Agent(agent) => agent.hand_mut(),
        }
    }

    #[must_use]
    pub fn agent(&self) -> Option<&DecisionAgent> {
        match self {
            Occupant::Agent(agent) => Some(agent),
            Occupant::Human(_) => None,
        }
    }

    pub fn agent_mut(&mut self) -> Option<&mut DecisionAgent> {
        match self {
            Occupant::Agent(agent) => Some(agent),
            Occupant::Human(_) => None,
        }
    }
}

/// A game session between two seats.
///
/// ## Usage
///
/// ```
/// use taki_engine::core::{GameConfig, Seat, Status};
/// use taki_engine::game::Game;
///
/// let config = GameConfig::default().with_agent_seat(None);
/// let mut game = Game::new(config).unwrap();
/// game.start(Seat::A).unwrap();
///
/// assert_eq!(game.status(), Status::Active);
/// assert_eq!(game.hand(Seat::A).len(), 8);
/// assert!(game.top_of_discard().is_some());
/// ```
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    rng: GameRng,
    state: GameState,
    deck: PileDeck,
    seats: SeatMap<Occupant>,
    scheduler: TurnScheduler,
    timers: Timers,

    /// Permissions of the seat whose turn it is; `None` before the start.
    turn: Option<TurnContext>,

    /// Context captured by `pause`, restored by `resume`.
    paused_turn: Option<TurnContext>,

    /// Seat whose pending agent turn was cancelled by `pause`.
    interrupted_agent_turn: Option<Seat>,
}

impl Game {
    /// Create a session with a freshly shuffled standard deck.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let mut rng = GameRng::new(config.seed);
        let deck = PileDeck::standard(rng.fork());
        Self::assemble(config, rng, deck)
    }

    /// Create a session over a prepared deck. Seat A is dealt first.
    pub fn with_deck(config: GameConfig, deck: PileDeck) -> Result<Self, ConfigError> {
        let rng = GameRng::new(config.seed);
        Self::assemble(config, rng, deck)
    }

    fn assemble(config: GameConfig, mut rng: GameRng, deck: PileDeck) -> Result<Self, ConfigError> {
        config.validate()?;
        let seats = Self::seat_occupants(&config, &mut rng);
        Ok(Self {
            config,
            rng,
            state: GameState::new(),
            deck,
            seats,
            scheduler: TurnScheduler::new(),
            timers: Timers::new(),
            turn: None,
            paused_turn: None,
            interrupted_agent_turn: None,
        })
    }

    fn seat_occupants(config: &GameConfig, rng: &mut GameRng) -> SeatMap<Occupant> {
        SeatMap::new(|seat| {
            if config.agent_seat == Some(seat) {
                Occupant::Agent(DecisionAgent::new(seat, config.agent.clone(), rng.fork()))
            } else {
                Occupant::Human(Hand::new())
            }
        })
    }

    // === Lifecycle ===

    /// Deal, reveal a starting number card and start `first`'s turn.
    pub fn start(&mut self, first: Seat) -> Result<(), RuleError> {
        if self.turn.is_some() || self.state.status() == Status::Concluded {
            return Err(RuleError::phase(first, "the game has already started"));
        }

        for seat in Seat::ALL {
            let cards = self.deck.draw_cards(self.config.hand_size);
            self.seats[seat].hand_mut().extend(cards);
        }

        // Flip until a number card is showing.
        while let Some(card) = self.deck.draw_card() {
            self.deck.discard(card);
            if card.kind() == CardKind::Number {
                break;
            }
        }
        let Some(top) = self.deck.top_of_discard().copied() else {
            return Err(RuleError::ResourceExhausted);
        };
        self.state.update_active_color_from_card(&top);
        self.state.change_status(Status::Active);

        info!("game started: {first} opens on {top}");
        self.begin_turn(first);
        Ok(())
    }

    /// Suspend the game: no action is accepted and no timer runs until
    /// [`Self::resume`].
    pub fn pause(&mut self) {
        if self.state.status() != Status::Active {
            return;
        }
        self.state.change_status(Status::Paused);
        self.paused_turn = self.turn;
        if self.scheduler.cancel_agent_turn(&mut self.timers) {
            self.interrupted_agent_turn = self.state.turn_owner().seat();
        }
        for (_, occupant) in self.seats.iter_mut() {
            if let Some(agent) = occupant.agent_mut() {
                agent.pause(&mut self.timers);
            }
        }
        info!("game paused");
    }

    /// Continue a paused game with the turn context restored as it was.
    /// An agent decision in progress resumes from its snapshot; an agent
    /// turn still inside its natural delay waits the full delay again.
    pub fn resume(&mut self) {
        if self.state.status() != Status::Paused {
            return;
        }
        self.state.change_status(Status::Active);
        self.turn = self.paused_turn.take();
        for (_, occupant) in self.seats.iter_mut() {
            if let Some(agent) = occupant.agent_mut() {
                agent.resume(&mut self.timers);
            }
        }
        info!("game resumed");
        if let Some(seat) = self.interrupted_agent_turn.take() {
            self.scheduler
                .schedule_agent_turn(&mut self.timers, seat, self.config.turn_delay);
        }
    }

    /// Return to the pre-start state with a freshly shuffled deck.
    pub fn reset(&mut self) {
        self.timers.clear();
        self.scheduler.reset();
        self.state.reset();
        for (_, occupant) in self.seats.iter_mut() {
            match occupant {
                Occupant::Human(hand) => hand.clear(),
                Occupant::Agent(agent) => agent.reset(&mut self.timers),
            }
        }
        self.deck = PileDeck::standard(self.rng.fork());
        self.turn = None;
        self.paused_turn = None;
        self.interrupted_agent_turn = None;
        info!("game reset");
    }

    /// Advance the clock and run every agent callback that comes due.
    pub fn tick(&mut self, elapsed: Duration) {
        let mut due = self.timers.advance(elapsed);
        while !due.is_empty() {
            for (id, task) in due {
                self.run_task(id, task);
            }
            // Zero-delay follow-ups scheduled by the tasks above.
            due = self.timers.advance(Duration::ZERO);
        }
    }

    /// Notifications accumulated since the last drain.
    pub fn drain_changes(&mut self) -> Vec<StateChange> {
        let changes = self.state.take_changes();
        for change in &changes {
            debug!("change: {change}");
        }
        changes
    }

    // === Action surface ===

    pub fn request_play(&mut self, seat: Seat, card: Card) -> Result<Resolution, RuleError> {
        self.ensure_external(seat)?;
        self.act_play(seat, card)
    }

    pub fn request_draw(&mut self, seat: Seat) -> Result<Vec<Card>, RuleError> {
        self.ensure_external(seat)?;
        self.act_draw(seat)
    }

    pub fn request_end_turn(&mut self, seat: Seat) -> Result<(), RuleError> {
        self.ensure_external(seat)?;
        self.act_end_turn(seat)
    }

    pub fn request_end_sequence(&mut self, seat: Seat) -> Result<Resolution, RuleError> {
        self.ensure_external(seat)?;
        self.act_end_sequence(seat)
    }

    pub fn request_color_choice(&mut self, seat: Seat, color: Color) -> Result<(), RuleError> {
        self.ensure_external(seat)?;
        self.act_choose_color(seat, color)
    }

    /// Dispatch a serialized action, e.g. one mirrored from a remote peer.
    pub fn apply(&mut self, seat: Seat, action: Action) -> Result<(), RuleError> {
        match action {
            Action::Play(card) => self.request_play(seat, card).map(drop),
            Action::Draw => self.request_draw(seat).map(drop),
            Action::EndTurn => self.request_end_turn(seat),
            Action::EndSequence => self.request_end_sequence(seat).map(drop),
            Action::ChooseColor(color) => self.request_color_choice(seat, color),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn deck(&self) -> &PileDeck {
        &self.deck
    }

    #[must_use]
    pub fn turn_context(&self) -> Option<&TurnContext> {
        self.turn.as_ref()
    }

    /// Legal plays for the seat whose turn it is.
    #[must_use]
    pub fn legal_moves(&self) -> LegalMoves {
        match (self.turn, self.state.is_live()) {
            (Some(ctx), true) => self
                .state
                .legal_moves(self.hand(ctx.seat).cards(), self.top_of_discard()),
            _ => LegalMoves::new(),
        }
    }

    #[must_use]
    pub fn legal_move_count(&self) -> usize {
        self.legal_moves().len()
    }

    #[must_use]
    pub fn can_end_turn(&self) -> bool {
        self.state.is_live() && self.turn.is_some_and(|ctx| ctx.can_end_turn)
    }

    #[must_use]
    pub fn active_color(&self) -> Option<Color> {
        self.state.active_color()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.state.mode()
    }

    #[must_use]
    pub fn turn_owner(&self) -> TurnOwner {
        self.state.turn_owner()
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.state.status()
    }

    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        self.state.winner()
    }

    #[must_use]
    pub fn hand(&self, seat: Seat) -> &Hand {
        self.seats[seat].hand()
    }

    /// Mutable hand access for selection state; cards move only through
    /// actions.
    pub fn hand_mut(&mut self, seat: Seat) -> &mut Hand {
        self.seats[seat].hand_mut()
    }

    #[must_use]
    pub fn agent(&self, seat: Seat) -> Option<&DecisionAgent> {
        self.seats[seat].agent()
    }

    #[must_use]
    pub fn top_of_discard(&self) -> Option<&Card> {
        self.deck.top_of_discard()
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        self.state.history()
    }

    // === Turn plumbing ===

    fn ensure_external(&self, seat: Seat) -> Result<(), RuleError> {
        if self.config.agent_seat == Some(seat) {
            return Err(RuleError::phase(seat, "this seat is played by the computer"));
        }
        Ok(())
    }

    fn is_agent(&self, seat: Seat) -> bool {
        self.config.agent_seat == Some(seat)
    }

    /// Start the turn due for `seat`, honouring an armed Stop skip.
    fn begin_turn(&mut self, seat: Seat) {
        if !self.state.is_live() {
            return;
        }
        let seat = self.scheduler.resolve_start(seat);
        let mut env = FlowEnv::new(
            &mut self.state,
            &mut self.scheduler,
            &mut self.deck,
            self.seats[seat].hand_mut(),
        );
        self.turn = TurnFlow::start_turn(&mut env, seat);

        if self.turn.is_some() && self.is_agent(seat) {
            self.scheduler
                .schedule_agent_turn(&mut self.timers, seat, self.config.turn_delay);
        }
    }

    /// Run one turn-flow step for `seat` against the current context.
    fn with_turn<T>(
        &mut self,
        seat: Seat,
        step: impl FnOnce(&mut FlowEnv, &mut TurnContext) -> Result<T, RuleError>,
    ) -> Result<T, RuleError> {
        let Self {
            state,
            scheduler,
            deck,
            seats,
            turn,
            ..
        } = self;
        let Some(ctx) = turn.as_mut() else {
            return Err(RuleError::phase(seat, "the game has not started"));
        };
        let mut env = FlowEnv::new(state, scheduler, deck, seats[seat].hand_mut());
        step(&mut env, ctx)
    }

    fn act_play(&mut self, seat: Seat, card: Card) -> Result<Resolution, RuleError> {
        self.with_turn(seat, |env, ctx| TurnFlow::play(env, ctx, seat, card))
    }

    fn act_draw(&mut self, seat: Seat) -> Result<Vec<Card>, RuleError> {
        self.with_turn(seat, |env, ctx| TurnFlow::draw(env, ctx, seat))
    }

    fn act_end_turn(&mut self, seat: Seat) -> Result<(), RuleError> {
        let next = self.with_turn(seat, |env, ctx| TurnFlow::end_turn(env, ctx, seat))?;
        self.begin_turn(next);
        Ok(())
    }

    fn act_end_sequence(&mut self, seat: Seat) -> Result<Resolution, RuleError> {
        self.with_turn(seat, |env, ctx| TurnFlow::end_sequence(env, ctx, seat))
    }

    fn act_choose_color(&mut self, seat: Seat, color: Color) -> Result<(), RuleError> {
        self.with_turn(seat, |env, ctx| TurnFlow::choose_color(env, ctx, seat, color))
    }

    // === Agent driving ===

    fn run_task(&mut self, id: TimerId, task: Task) {
        match task {
            Task::AgentTurn(seat) => {
                self.scheduler.agent_turn_fired(id);
                self.agent_think(seat);
            }
            Task::AgentCommit(seat) => self.agent_commit(seat, id),
        }
    }

    /// Snapshot what the agent's next decision depends on.
    fn decision_context(&self, seat: Seat) -> Option<DecisionContext> {
        let ctx = self.turn.filter(|ctx| ctx.seat == seat)?;
        let top = self.top_of_discard().copied();
        let legal = if ctx.can_play {
            self.state.legal_moves(self.hand(seat).cards(), top.as_ref())
        } else {
            LegalMoves::new()
        };
        Some(DecisionContext {
            seat,
            turn: self.state.turn_number(),
            top,
            active_color: self.state.active_color(),
            mode: self.state.mode(),
            legal,
            can_draw: ctx.can_draw,
            can_end_turn: ctx.can_end_turn,
            can_end_sequence: ctx.can_end_sequence,
        })
    }

    fn agent_think(&mut self, seat: Seat) {
        if !self.state.is_live() || !self.state.turn_owner().is(seat) {
            return;
        }
        let Some(context) = self.decision_context(seat) else {
            return;
        };
        let Some(agent) = self.seats[seat].agent_mut() else {
            return;
        };
        if agent.is_thinking() {
            debug!("agent {seat}: already thinking");
            return;
        }
        agent.request_decision(context, &mut self.timers);
    }

    fn agent_commit(&mut self, seat: Seat, id: TimerId) {
        let Some(decision) = self.seats[seat].agent_mut().and_then(|agent| agent.commit(id)) else {
            return;
        };
        let turn_before = self.state.turn_number();

        if let Err(err) = self.apply_decision(seat, decision) {
            warn!("agent {seat}: {decision:?} rejected ({err}), falling back");
            self.agent_fallback(seat);
        }
        if let Some(agent) = self.seats[seat].agent_mut() {
            agent.finish();
        }

        if self.state.turn_number() == turn_before {
            self.agent_follow_up(seat, decision);
        }
    }

    fn apply_decision(&mut self, seat: Seat, decision: Decision) -> Result<(), RuleError> {
        match decision {
            Decision::Play(card) => self.act_play(seat, card).map(drop),
            Decision::Draw => self.act_draw(seat).map(drop),
            Decision::EndSequence => self.act_end_sequence(seat).map(drop),
            Decision::ChooseColor(color) => self.act_choose_color(seat, color),
            Decision::EndTurn => self.act_end_turn(seat),
        }
    }

    /// Try the safest remaining actions in turn until one is accepted.
    fn agent_fallback(&mut self, seat: Seat) {
        let Some(ctx) = self.turn else {
            return;
        };
        let mut fallbacks = Vec::with_capacity(3);
        if ctx.can_draw {
            fallbacks.push(Decision::Draw);
        }
        if ctx.can_end_sequence {
            fallbacks.push(Decision::EndSequence);
        }
        fallbacks.push(Decision::EndTurn);

        for decision in fallbacks {
            match self.apply_decision(seat, decision) {
                Ok(()) => return,
                Err(err) => warn!("agent {seat}: fallback {decision:?} rejected ({err})"),
            }
        }
    }

    /// Continue the agent's turn after a resolved decision.
    fn agent_follow_up(&mut self, seat: Seat, last: Decision) {
        if !self.state.is_live() || !self.state.turn_owner().is(seat) {
            return;
        }
        let Some(ctx) = self.turn.filter(|ctx| ctx.seat == seat) else {
            return;
        };

        if self.state.mode() == InteractionMode::ColorSelection {
            if !matches!(last, Decision::ChooseColor(_)) {
                let color = match self.seats[seat].agent_mut() {
                    Some(agent) => agent.choose_color(),
                    None => return,
                };
                if let Err(err) = self.act_choose_color(seat, color) {
                    warn!("agent {seat}: color choice rejected ({err})");
                }
            }
            self.agent_end_turn(seat);
        } else if ctx.must_end_turn() {
            self.agent_end_turn(seat);
        } else {
            self.agent_think(seat);
        }
    }

    fn agent_end_turn(&mut self, seat: Seat) {
        if let Err(err) = self.act_end_turn(seat) {
            warn!("agent {seat}: end turn rejected ({err})");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Color;

    fn two_humans() -> GameConfig {
        GameConfig::default().with_agent_seat(None).with_hand_size(3)
    }

    fn red(rank: u8) -> Card {
        Card::number(rank, Color::Red)
    }

    #[test]
    fn start_deals_and_flips_number() {
        let blue = |rank| Card::number(rank, Color::Blue);
        let deck = PileDeck::stacked([
            red(1),
            red(3),
            red(4),
            blue(5),
            blue(6),
            blue(7),
            Card::change_color(),
            Card::special(CardKind::Stop, Color::Green),
            Card::number(9, Color::Green),
        ]);
        let mut game = Game::with_deck(two_humans(), deck).unwrap();
        game.start(Seat::A).unwrap();

        assert_eq!(game.hand(Seat::A).cards(), &[red(1), red(3), red(4)]);
        assert_eq!(game.top_of_discard(), Some(&Card::number(9, Color::Green)));
        assert_eq!(game.active_color(), Some(Color::Green));
        assert_eq!(game.turn_owner(), TurnOwner::Seat(Seat::A));
        assert_eq!(game.deck().discard_len(), 3);
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut game = Game::new(two_humans()).unwrap();
        game.start(Seat::A).unwrap();
        assert!(matches!(game.start(Seat::B), Err(RuleError::WrongPhase { .. })));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig::default().with_hand_size(0);
        assert!(Game::new(config).is_err());
    }

    #[test]
    fn agent_seat_rejects_outside_requests() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        game.start(Seat::B).unwrap();
        let err = game.request_draw(Seat::B).unwrap_err();
        assert!(matches!(err, RuleError::WrongPhase { seat: Seat::B, .. }));
    }

    #[test]
    fn actions_before_start_are_rejected() {
        let mut game = Game::new(two_humans()).unwrap();
        assert!(matches!(game.request_draw(Seat::A), Err(RuleError::WrongPhase { .. })));
    }

    #[test]
    fn reset_returns_to_pre_start() {
        let mut game = Game::new(two_humans()).unwrap();
        game.start(Seat::A).unwrap();
        game.request_draw(Seat::A).unwrap();
        game.reset();

        assert!(game.turn_context().is_none());
        assert!(game.history().is_empty());
        assert!(game.hand(Seat::A).is_empty());
        assert_eq!(game.deck().draw_len(), 110);
        game.start(Seat::B).unwrap();
        assert_eq!(game.turn_owner(), TurnOwner::Seat(Seat::B));
    }

    #[test]
    fn drain_changes_empties_queue() {
        let mut game = Game::new(two_humans()).unwrap();
        game.start(Seat::A).unwrap();
        let changes = game.drain_changes();
        assert!(changes.contains(&StateChange::TurnChanged { owner: Seat::A.into(), turn: 1 }));
        assert!(game.drain_changes().is_empty());
    }
}
