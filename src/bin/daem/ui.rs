//! Terminal control surface.
//!
//! Runs on the control thread: reads keys, turns them into commands for the
//! render thread and draws the latest status snapshot the engine published.

use std::{sync::Arc, time::Duration};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use daem::{
    control::{action_for_key, ControlAction, KEY_HELP},
    dsp::{
        filter::FilterMode,
        filter_bank::{band_frequency, band_mode},
    },
    engine::{latest_status, CommandSender, EngineStatus},
    io::bridge::XrunCounters,
    EngineConfig,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

pub struct ControlPanel<'a> {
    commands: &'a mut CommandSender,
    status_rx: Consumer<EngineStatus>,
    status: EngineStatus,
    xruns: Arc<XrunCounters>,
    /// Counts already reported in the log: (overruns, underruns).
    logged_xruns: (u64, u64),
    config: EngineConfig,
    should_quit: bool,
}

impl<'a> ControlPanel<'a> {
    pub fn new(
        commands: &'a mut CommandSender,
        status_rx: Consumer<EngineStatus>,
        xruns: Arc<XrunCounters>,
        config: &EngineConfig,
    ) -> Self {
        let status = EngineStatus {
            effects: config.effects,
            band_mask: u32::MAX
                .checked_shr(u32::BITS - config.bands.min(32) as u32)
                .unwrap_or(0),
            bands: config.bands as u8,
            ..EngineStatus::default()
        };

        Self {
            commands,
            status_rx,
            status,
            xruns,
            logged_xruns: (0, 0),
            config: config.clone(),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            if let Some(status) = latest_status(&mut self.status_rx) {
                self.status = status;
            }
            self.report_xruns();

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            if self.commands.is_abandoned() {
                log::error!("render engine went away, leaving control loop");
                self.should_quit = true;
            }
        }
        Ok(())
    }

    fn report_xruns(&mut self) {
        let (overruns, underruns) = (self.xruns.overruns(), self.xruns.underruns());
        let (logged_over, logged_under) = self.logged_xruns;
        if overruns > logged_over {
            let blocks = overruns - logged_over;
            log::warn!("stream overflow: {} capture blocks did not fit", blocks);
        }
        if underruns > logged_under {
            let blocks = underruns - logged_under;
            log::warn!("stream underflow: {} blocks rendered over silence", blocks);
        }
        self.logged_xruns = (overruns, underruns);
    }

    fn handle_key(&mut self, key: KeyCode) {
        let action = match key {
            KeyCode::Esc => Some(ControlAction::Quit),
            KeyCode::Char(c) => action_for_key(c),
            _ => None,
        };

        match action {
            Some(ControlAction::Quit) => self.should_quit = true,
            Some(ControlAction::Submit(command)) => {
                self.commands.submit(command);
            }
            None => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Effects
                Constraint::Length(3), // Bands
                Constraint::Length(3), // Input meter
                Constraint::Length(3), // Output meter
                Constraint::Min(1),    // Stream info
                Constraint::Length(1), // Help
            ])
            .split(frame.area());

        self.render_effects(frame, chunks[0]);
        self.render_bands(frame, chunks[1]);
        render_meter(frame, chunks[2], " Input ", self.status.input_peak);
        render_meter(frame, chunks[3], " Output ", self.status.output_peak);
        self.render_info(frame, chunks[4]);

        let help = Paragraph::new(KEY_HELP).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[5]);
    }

    fn render_effects(&self, frame: &mut Frame, area: Rect) {
        let effects = self.status.effects;
        let line = Line::from(vec![
            switch_span("FILTER", effects.filter),
            Span::raw("  "),
            switch_span("DELAY", effects.delay),
            Span::raw("  "),
            switch_span("HALL", effects.hall),
        ]);
        let block = Block::default().title(" daem ").borders(Borders::ALL);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_bands(&self, frame: &mut Frame, area: Rect) {
        let bands = self.status.bands as usize;
        let mut spans = Vec::with_capacity(bands * 2);
        for band in 0..bands {
            let freq = band_frequency(
                band,
                bands,
                self.config.low_cutoff_hz,
                self.config.high_cutoff_hz,
            );
            let kind = match band_mode(band, bands) {
                FilterMode::Highpass => "HP",
                FilterMode::Bandpass => "BP",
                FilterMode::Lowpass => "LP",
            };
            let label = format!("{}:{} {:.0}Hz", band + 1, kind, freq);
            spans.push(switch_span(&label, self.status.is_band_enabled(band)));
            spans.push(Span::raw(" "));
        }

        let dim = !self.status.effects.filter;
        let block = Block::default()
            .title(" Filter bands ")
            .borders(Borders::ALL)
            .border_style(if dim {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            });
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_info(&self, frame: &mut Frame, area: Rect) {
        let delay_ms = self.config.delay_samples as f64 / self.config.sample_rate * 1000.0;
        let lines = vec![
            Line::from(format!(
                " {:.1} kHz  {} ch  {} frame blocks  delay {} samples ({:.0} ms)",
                self.config.sample_rate / 1000.0,
                self.config.channels,
                self.config.block_size,
                self.config.delay_samples,
                delay_ms,
            )),
            Line::from(format!(
                " blocks rendered: {}  dropped commands: {}  overruns: {}  underruns: {}",
                self.status.blocks_rendered,
                self.commands.dropped(),
                self.xruns.overruns(),
                self.xruns.underruns(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn switch_span(label: &str, on: bool) -> Span<'static> {
    let style = if on {
        Style::default().fg(Color::Black).bg(Color::LightGreen)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!(" {} ", label), style)
}

fn render_meter(frame: &mut Frame, area: Rect, title: &str, peak: f64) {
    let color = if peak >= 1.0 {
        Color::LightRed
    } else if peak >= 0.7 {
        Color::LightYellow
    } else {
        Color::LightGreen
    };
    let gauge = Gauge::default()
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(peak.clamp(0.0, 1.0))
        .label(format!("{:.3}", peak));
    frame.render_widget(gauge, area);
}
