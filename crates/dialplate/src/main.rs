use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dialplate_config::Config;
use dialplate_core::{ClockState, PLATE_COUNT, PlateIndex, PlateSurface};
use dialplate_render::{Pan, PlateScene, PlateStyle};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};
use tracing::{debug, info};

mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    match logging::init() {
        Ok(path) => info!(path = %path.display(), "dialplate starting"),
        Err(err) => eprintln!("dialplate: logging disabled: {err:#}"),
    }

    let config = Config::load()?;
    let app = App::new(&config)?;

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Rule table, time mode and the latest plate angles.
    clock: ClockState,
    /// The drawing surface the angles are applied to.
    scene: PlateScene,
    /// Time between frames.
    frame_interval: Duration,
    /// When the previous frame was sampled.
    last_tick: Instant,
}

impl App {
    /// Construct a new instance of [`App`] from validated settings.
    pub fn new(config: &Config) -> color_eyre::Result<Self> {
        config.validate()?;
        let clock = ClockState::new(
            config.rotation_mapper()?,
            config.display.hour_convention,
            config.time_lapse.multiplier,
        );

        let styles: [PlateStyle; PLATE_COUNT] = std::array::from_fn(|index| {
            let plate = &config.plates[index];
            let ticks = PlateIndex::new(index)
                .ok()
                .and_then(|index| clock.mapper().rule_for(index))
                .map_or(0, |rule| rule.digit.cardinality());
            PlateStyle {
                radius: plate.radius,
                color: plate.color,
                ticks,
            }
        });
        let mut scene = PlateScene::new(styles);
        scene.set_show_grid(config.display.show_grid);

        Ok(Self {
            running: false,
            clock,
            scene,
            frame_interval: config.frame_interval(),
            last_tick: Instant::now(),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        info!(
            frame_interval_ms = self.frame_interval.as_millis() as u64,
            "render loop started"
        );
        while self.running {
            self.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        info!("render loop stopped");
        Ok(())
    }

    /// Sample the clock and turn the plates.
    fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;

        self.clock.tick(&Local::now(), delta);
        self.clock.apply_to(&mut self.scene);
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Dial
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        self.scene.render_frame(frame, chunks[0]);

        let sample = self.clock.sample();
        let status = Line::from(vec![
            format!("{:02}:{:02}", sample.hours(), sample.minutes())
                .bold()
                .white(),
            "  ".into(),
            self.clock.mode().label().cyan(),
            "  ".into(),
            self.clock.convention().label().dark_gray(),
        ])
        .centered();
        frame.render_widget(status, chunks[1]);

        let key = |k: &'static str| k.bold().cyan();
        let help = Line::from(vec![
            key("q"),
            " quit  ".dark_gray(),
            key("l"),
            " time-lapse  ".dark_gray(),
            key("t"),
            " 12/24h  ".dark_gray(),
            key("r"),
            " reset view  ".dark_gray(),
            key("+/-"),
            " zoom  ".dark_gray(),
            key("g"),
            " grid".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[2]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with the frame interval as timeout so the dial keeps moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('l')) => self.clock.toggle_time_lapse(&Local::now()),
            (_, KeyCode::Char('t')) => self.clock.toggle_hour_convention(),
            (_, KeyCode::Char('r')) => self.scene.reset_view(),
            (_, KeyCode::Char('g')) => self.scene.toggle_grid(),
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => self.scene.view_mut().zoom_in(),
            (_, KeyCode::Char('-')) => self.scene.view_mut().zoom_out(),
            (_, KeyCode::Up) => self.scene.view_mut().pan(Pan::Up),
            (_, KeyCode::Down) => self.scene.view_mut().pan(Pan::Down),
            (_, KeyCode::Left) => self.scene.view_mut().pan(Pan::Left),
            (_, KeyCode::Right) => self.scene.view_mut().pan(Pan::Right),
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
