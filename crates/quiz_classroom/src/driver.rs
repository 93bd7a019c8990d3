//! Classroom driver: runs matches between the terminal and the core.

use super::config::ClassroomConfig;
use super::input::LineInput;
use super::render;
use anyhow::Result;
use quiz_tictactoe::{
    AttemptOutcome, MatchContext, MatchSetup, Position, Question, QuizClock, QuizEvent,
    ValidatedSetup, Win, parse_option,
};
use std::io::Write;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// How a match ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEnd {
    /// A team completed a line.
    Won(Win),
    /// The class left, or input ended.
    Quit,
}

/// Result of one claim attempt.
enum Attempt {
    Rejected,
    Resolved(AttemptOutcome),
    Quit,
}

/// Runs matches for one class.
pub struct Classroom<I, W> {
    context: MatchContext,
    setup: ValidatedSetup,
    input: I,
    out: W,
}

fn is_quit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("quit")
}

impl<I: LineInput, W: Write> Classroom<I, W> {
    /// Creates a driver for a validated setup.
    pub fn new(context: MatchContext, setup: ValidatedSetup, input: I, out: W) -> Self {
        Self {
            context,
            setup,
            input,
            out,
        }
    }

    /// Loads questions and teams from a config and creates a driver.
    #[instrument(skip_all)]
    pub fn from_config(config: &ClassroomConfig, input: I, out: W) -> Result<Self> {
        let source = config.question_source()?;
        let questions = source.load()?;
        info!(source = %source.label(), count = questions.len(), "Questions loaded");

        let setup = MatchSetup::new()
            .teams(config.team_names())
            .questions(questions)
            .validate()?;

        let mut context = MatchContext::new(config.timing().clone());
        if let Some(seed) = config.seed() {
            context = context.with_seed(*seed);
        }
        Ok(Self::new(context, setup, input, out))
    }

    /// Plays matches until the class quits. Returns how each one ended.
    #[instrument(skip(self))]
    pub async fn run(mut self) -> Result<Vec<MatchEnd>> {
        let mut results = Vec::new();
        loop {
            self.context.reset();
            self.context.start(self.setup.clone())?;
            let teams: Vec<_> = self.setup.roster.teams().iter().map(|t| t.name.as_str()).collect();
            writeln!(self.out, "New match: {}", teams.join(" vs "))?;

            let end = self.play_match().await?;
            if let MatchEnd::Won(win) = &end {
                info!(winner = %win.team.name, "Match won");
                writeln!(
                    self.out,
                    "{}",
                    render::game_over(
                        self.context.engine().board(),
                        self.context.engine().state(),
                        Some(win)
                    )
                )?;
            }
            let quit = end == MatchEnd::Quit;
            results.push(end);
            if quit || !self.ask_again().await? {
                break;
            }
        }
        writeln!(self.out, "Goodbye!")?;
        self.out.flush()?;
        Ok(results)
    }

    async fn ask_again(&mut self) -> Result<bool> {
        loop {
            let Some(line) = self.input.next_line().await else {
                return Ok(false);
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("again") {
                return Ok(true);
            }
            if is_quit(line) {
                return Ok(false);
            }
            writeln!(self.out, "Type `again` or `quit`.")?;
        }
    }

    async fn play_match(&mut self) -> Result<MatchEnd> {
        loop {
            if let Some(win) = self.context.engine().winner() {
                return Ok(MatchEnd::Won(win.clone()));
            }
            writeln!(
                self.out,
                "{}",
                render::turn(self.context.engine().board(), &self.context.snapshot())
            )?;

            let Some(line) = self.input.next_line().await else {
                return Ok(MatchEnd::Quit);
            };
            if is_quit(&line) {
                return Ok(MatchEnd::Quit);
            }
            let Some(position) = Position::from_cell_number(&line) else {
                writeln!(self.out, "`{}` is not a cell. Type 1-9.", line.trim())?;
                continue;
            };
            match self.attempt(position).await? {
                Attempt::Quit => return Ok(MatchEnd::Quit),
                Attempt::Rejected => {}
                Attempt::Resolved(outcome) => debug!(?outcome, "Attempt applied"),
            }
        }
    }

    /// Asks a question for `position` and applies the verdict.
    #[instrument(skip(self), fields(turn_index = self.context.engine().turn_index()))]
    async fn attempt(&mut self, position: Position) -> Result<Attempt> {
        let session = match self.context.select_cell(position.index()) {
            Ok(session) => session,
            Err(e) => {
                writeln!(self.out, "{}", e)?;
                return Ok(Attempt::Rejected);
            }
        };
        writeln!(
            self.out,
            "{}",
            render::question(&session, *self.context.timing().answer_seconds())
        )?;
        let question = session.question().clone();

        let clock = QuizClock::new(self.context.timing().clone());
        let (answer_tx, mut answer_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let run = clock.run(session, &mut answer_rx, Some(&event_tx));
        tokio::pin!(run);

        let input = &mut self.input;
        let out = &mut self.out;
        let mut answering = true;
        let mut input_open = true;

        let resolution = loop {
            tokio::select! {
                biased;

                result = &mut run => break result?,

                Some(event) = event_rx.recv() => {
                    if matches!(event, QuizEvent::Locked { .. }) {
                        answering = false;
                    }
                    show_event(out, &event, &question)?;
                }

                line = input.next_line(), if answering && input_open => match line {
                    None => input_open = false,
                    Some(line) if is_quit(&line) => {
                        self.context.abandon_attempt();
                        return Ok(Attempt::Quit);
                    }
                    Some(line) => match parse_option(&line) {
                        Some(option) => {
                            let _ = answer_tx.send(option);
                        }
                        None => writeln!(out, "Answer with A, B, C or D.")?,
                    },
                },
            }
        };
        while let Ok(event) = event_rx.try_recv() {
            show_event(out, &event, &question)?;
        }

        let outcome = self.context.resolve_attempt(&resolution)?;
        writeln!(self.out, "{}", render::resolution(&resolution))?;
        Ok(Attempt::Resolved(outcome))
    }
}

fn show_event(out: &mut impl Write, event: &QuizEvent, question: &Question) -> Result<()> {
    match event {
        QuizEvent::Tick {
            seconds_remaining,
            critical,
        } => {
            if let Some(notice) = render::countdown(*seconds_remaining, *critical) {
                writeln!(out, "{}", notice)?;
            }
        }
        QuizEvent::InvalidOption(option) => writeln!(out, "Option {} does not exist.", option)?,
        QuizEvent::Locked { selected, correct } => {
            writeln!(out, "{}", render::verdict(*selected, *correct))?;
            if !correct {
                writeln!(out, "{}", render::correct_answer(question))?;
            }
        }
        QuizEvent::Resolved(_) => {}
    }
    Ok(())
}
