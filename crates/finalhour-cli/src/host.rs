//! Interactive host: owns the engine and the checkpoints, turns input lines
//! into engine commands and plays the resulting cues.

use std::io::Write;

use finalhour_core::clock::Channel;
use finalhour_core::storage::{LabelsConfig, SoundsConfig};
use finalhour_core::{
    CheckpointStore, ClockEngine, ClockState, Command, Config, Cue, CueSink, ResumeLine, Speed,
};

pub const HELP: &str = "\
commands:
  p, pause        toggle pause
  run | stop      force running / paused
  s, speed        toggle normal / slow speed
  f, forward      jump to the next hour
  b, backward     jump back to the start of the hour
  r, reset        back to the dawn of the first day
  save <name>     save the current time
  load <name>     restore a saved time
  delete <name>   remove a saved time
  saves           list saved times
  status          print the clock state as JSON
  q, quit         save the resumption line and exit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Engine(Command),
    Save(String),
    Load(String),
    Delete(String),
    ListSaves,
    Status,
    Help,
    Quit,
}

impl HostCommand {
    /// Parse an input line; `None` for blank or unknown input.
    ///
    /// Checkpoint names keep their inner spaces, so `save my save` saves "my save".
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(' ') {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match (word.to_ascii_lowercase().as_str(), rest) {
            ("p" | "pause", "") => HostCommand::Engine(Command::TOGGLE),
            ("run", "") => HostCommand::Engine(Command::RUN),
            ("stop", "") => HostCommand::Engine(Command::PAUSE),
            ("s" | "speed", "") => HostCommand::Engine(Command::CycleSpeed),
            ("f" | "forward", "") => HostCommand::Engine(Command::Forward),
            ("b" | "backward", "") => HostCommand::Engine(Command::Backward),
            ("r" | "reset", "") => HostCommand::Engine(Command::Reset),
            ("save", name) if !name.is_empty() => HostCommand::Save(name.to_string()),
            ("load", name) if !name.is_empty() => HostCommand::Load(name.to_string()),
            ("delete", name) if !name.is_empty() => HostCommand::Delete(name.to_string()),
            ("saves", "") => HostCommand::ListSaves,
            ("status", "") => HostCommand::Status,
            ("h" | "help" | "?", "") => HostCommand::Help,
            ("q" | "quit" | "exit", "") => HostCommand::Quit,
            _ => return None,
        };
        Some(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Cue sink without a mixer: reports each cue with its sound file and
/// tracks what would be playing on each channel.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    sounds: SoundsConfig,
    playing: Vec<(Channel, Cue)>,
}

impl ConsoleSink {
    pub fn new(sounds: SoundsConfig) -> Self {
        Self {
            sounds,
            playing: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn playing(&self) -> &[(Channel, Cue)] {
        &self.playing
    }
}

impl CueSink for ConsoleSink {
    fn play(&mut self, cue: Cue) {
        if cue == Cue::Stop {
            tracing::debug!("stopping all channels");
            self.playing.clear();
            return;
        }
        let channel = cue.channel();
        let file = self.sounds.path_for(cue).unwrap_or_default();
        tracing::info!(%cue, ?channel, file, "playing cue");
        self.playing.retain(|(c, _)| *c != channel);
        self.playing.push((channel, cue));
    }
}

pub struct Host<W: Write> {
    engine: ClockEngine,
    store: CheckpointStore,
    sink: ConsoleSink,
    labels: LabelsConfig,
    entrypoint: String,
    out: W,
}

impl<W: Write> Host<W> {
    pub fn new(config: &Config, engine: ClockEngine, store: CheckpointStore, out: W) -> Self {
        Self {
            engine,
            store,
            sink: ConsoleSink::new(config.sounds.clone()),
            labels: config.labels.clone(),
            entrypoint: config.system.entrypoint.clone(),
            out,
        }
    }

    pub fn engine(&self) -> &ClockEngine {
        &self.engine
    }

    #[cfg(test)]
    pub fn store(&self) -> &CheckpointStore {
        &self.store
    }

    #[cfg(test)]
    pub fn sink(&self) -> &ConsoleSink {
        &self.sink
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// One scheduler beat. Prints the clock when an hour boundary was crossed.
    pub fn on_tick(&mut self) -> std::io::Result<()> {
        if !self.engine.is_running() {
            return Ok(());
        }
        let cues = self.engine.tick();
        self.sink.play_all(&cues);
        if self.engine.minute() == 0 {
            self.print_status()?;
        }
        if self.engine.is_ended() {
            writeln!(self.out, "The final hour has come.")?;
        }
        Ok(())
    }

    pub fn handle(&mut self, command: HostCommand) -> std::io::Result<Flow> {
        match command {
            HostCommand::Engine(command) => {
                let cues = self.engine.apply(command);
                self.sink.play_all(&cues);
                self.print_status()?;
            }
            HostCommand::Save(name) => {
                self.engine.apply(Command::PAUSE);
                let time = self.engine.time();
                tracing::debug!(name = %name, %time, "trying to save");
                match self.store.create_at(&name, time) {
                    Ok(()) => writeln!(self.out, "saved \"{name}\" at {}", time.describe())?,
                    Err(e) => writeln!(self.out, "save error: {e}")?,
                }
            }
            HostCommand::Load(name) => {
                self.engine.apply(Command::PAUSE);
                match self.store.get(&name).map(|c| c.time()) {
                    Some(time) => {
                        let cues = self.engine.apply(Command::Restore { time });
                        self.sink.play_all(&cues);
                        tracing::info!(name = %name, %time, "checkpoint loaded");
                        self.print_status()?;
                    }
                    None => writeln!(self.out, "no save named \"{name}\"")?,
                }
            }
            HostCommand::Delete(name) => {
                self.engine.apply(Command::PAUSE);
                match self.store.get(&name) {
                    Some(_) => {
                        self.store.delete(&name);
                        writeln!(self.out, "deleted \"{name}\"")?;
                    }
                    None => writeln!(self.out, "no save named \"{name}\"")?,
                }
            }
            HostCommand::ListSaves => {
                if self.store.is_empty() {
                    writeln!(self.out, "no saves")?;
                }
                for checkpoint in self.store.iter() {
                    writeln!(self.out, "{checkpoint}")?;
                }
            }
            HostCommand::Status => {
                let json = serde_json::to_string_pretty(&self.engine.snapshot())
                    .map_err(std::io::Error::other)?;
                writeln!(self.out, "{json}")?;
            }
            HostCommand::Help => writeln!(self.out, "{HELP}")?,
            HostCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Parse and handle one input line.
    pub fn handle_line(&mut self, line: &str) -> std::io::Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        match HostCommand::parse(line) {
            Some(command) => self.handle(command),
            None => {
                writeln!(self.out, "unknown command: {} (try 'help')", line.trim())?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn status_line(&self) -> String {
        let snapshot = self.engine.snapshot();
        let state = match snapshot.state {
            ClockState::Running => "running",
            ClockState::Paused => "paused",
            ClockState::Ended => "ended",
        };
        let speed = match snapshot.speed {
            Speed::Normal => "",
            Speed::Slow => ", slow",
        };
        format!(
            "{} | {} | {:02}:{:02} [{state}{speed}]",
            self.labels.day(snapshot.day_label_index),
            self.labels.period(snapshot.period),
            snapshot.time.hour(),
            snapshot.time.minute(),
        )
    }

    pub fn print_status(&mut self) -> std::io::Result<()> {
        let line = self.status_line();
        writeln!(self.out, "{line}")
    }

    /// Stop all audio and build the resumption line.
    pub fn shutdown(&mut self) -> ResumeLine {
        self.sink.play(Cue::Stop);
        ResumeLine::new(self.entrypoint.clone(), self.engine.time(), &self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finalhour_core::ClockTime;

    fn host() -> Host<Vec<u8>> {
        let config = Config::default();
        let engine = ClockEngine::new(config.clock_settings());
        Host::new(&config, engine, CheckpointStore::new(), Vec::new())
    }

    fn output(host: Host<Vec<u8>>) -> String {
        String::from_utf8(host.into_output()).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(HostCommand::parse("p"), Some(HostCommand::Engine(Command::TOGGLE)));
        assert_eq!(HostCommand::parse("  Forward "), Some(HostCommand::Engine(Command::Forward)));
        assert_eq!(HostCommand::parse("save my save"), Some(HostCommand::Save("my save".into())));
        assert_eq!(HostCommand::parse("load   Alpha  "), Some(HostCommand::Load("Alpha".into())));
        assert_eq!(HostCommand::parse("q"), Some(HostCommand::Quit));
        assert_eq!(HostCommand::parse("save"), None);
        assert_eq!(HostCommand::parse("reset now"), None);
        assert_eq!(HostCommand::parse("dance"), None);
    }

    #[test]
    fn save_pauses_and_reports_errors() {
        let mut host = host();
        host.handle(HostCommand::Engine(Command::RUN)).unwrap();
        host.handle(HostCommand::Save("Alpha".into())).unwrap();
        assert!(!host.engine().is_running());
        host.handle(HostCommand::Save("Alpha".into())).unwrap();
        host.handle(HostCommand::Save("bad@name".into())).unwrap();
        assert_eq!(host.store().list(), vec!["Alpha".to_string()]);

        let out = output(host);
        assert!(out.contains("saved \"Alpha\" at Day 1, hour 5, min 0"));
        assert!(out.contains("already in use"));
        assert!(out.contains("\"bad@name\" is invalid"));
    }

    #[test]
    fn load_restores_time() {
        let mut host = host();
        host.handle(HostCommand::Engine(Command::Forward)).unwrap();
        host.handle(HostCommand::Save("six".into())).unwrap();
        host.handle(HostCommand::Engine(Command::Reset)).unwrap();
        host.handle(HostCommand::Load("six".into())).unwrap();
        assert_eq!(host.engine().time(), ClockTime::new(1, 6, 0).unwrap());
        host.handle(HostCommand::Load("nope".into())).unwrap();
        assert!(output(host).contains("no save named \"nope\""));
    }

    #[test]
    fn delete_and_list() {
        let mut host = host();
        host.handle(HostCommand::ListSaves).unwrap();
        host.handle(HostCommand::Save("one".into())).unwrap();
        host.handle(HostCommand::ListSaves).unwrap();
        host.handle(HostCommand::Delete("one".into())).unwrap();
        assert!(host.store().is_empty());

        let out = output(host);
        assert!(out.contains("no saves"));
        assert!(out.contains("\"one\", day 1 at 05:00"));
        assert!(out.contains("deleted \"one\""));
    }

    #[test]
    fn ticks_print_on_the_hour() {
        let mut host = host();
        host.handle(HostCommand::Engine(Command::RUN)).unwrap();
        for _ in 0..60 {
            host.on_tick().unwrap();
        }
        assert_eq!(host.engine().time(), ClockTime::new(1, 6, 0).unwrap());
        assert_eq!(host.sink().playing(), &[(Channel::Clock, Cue::Bells)]);

        let out = output(host);
        assert!(out.contains("Dawn of the First Day | Dawn | 06:00 [running]"));
    }

    #[test]
    fn stop_clears_playing_cues() {
        let mut sink = ConsoleSink::new(SoundsConfig::default());
        sink.play(Cue::Tick);
        sink.play(Cue::Rumble);
        sink.play(Cue::Bells);
        assert_eq!(
            sink.playing(),
            &[(Channel::Environment, Cue::Rumble), (Channel::Clock, Cue::Bells)]
        );
        sink.play(Cue::Stop);
        assert!(sink.playing().is_empty());
    }

    #[test]
    fn shutdown_builds_resume_line() {
        let mut host = host();
        host.handle(HostCommand::Save("Alpha".into())).unwrap();
        host.handle(HostCommand::Engine(Command::Forward)).unwrap();
        let line = host.shutdown();
        assert_eq!(
            line.render(),
            "finalhour --day 1 --hour 6 --minute 0 --saves=\"Alpha@1.05.00\""
        );
    }

    #[test]
    fn unknown_input_is_reported() {
        let mut host = host();
        assert_eq!(host.handle_line("jump").unwrap(), Flow::Continue);
        assert_eq!(host.handle_line("   ").unwrap(), Flow::Continue);
        assert_eq!(host.handle_line("quit").unwrap(), Flow::Quit);
        assert!(output(host).contains("unknown command: jump"));
    }
}
