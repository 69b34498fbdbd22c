use super::messages::{ColorPreset, Message};
use super::state::{
    App, PAUSE_TAG_ALPHA, SIDE_PANEL_WIDTH_PX, SURFACE_PADDING_PX, TEXT_SCROLL_ID,
    TOOLBAR_HEIGHT_PX, TRIGGER_HINT_ALPHA,
};
use iced::alignment::Vertical;
use iced::widget::text::{LineHeight, Rich, Span, Wrapping};
use iced::widget::{
    Column, Row, Space, button, checkbox, column, container, horizontal_space, pick_list, row,
    scrollable, slider, stack, text, text_editor,
};
use iced::{Background, Color, Element, Length};
use prompter_core::clock::{MAX_SPEED, MIN_SPEED, format_elapsed};
use prompter_core::layout::LEAD_IN_FRACTION;
use prompter_core::script::TOPIC_CHANGE_TOKEN;
use prompter_core::settings::{
    FontFamily, MAX_FONT_SIZE, MAX_HORIZONTAL_MARGIN, MAX_LINE_SPACING, MIN_FONT_SIZE,
    MIN_LINE_SPACING,
};
use prompter_core::{PauseKind, PlaybackPhase, SegmentKind};

const REC_COLOR: Color = Color::from_rgb(0.86, 0.16, 0.16);

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let surface = match &self.editor {
            Some(editor) => self.editor_view(editor),
            None => self.script_surface(),
        };

        let mut body: Row<'_, Message> = row![
            container(surface)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(SURFACE_PADDING_PX)
        ];
        if self.side_panel_visible() {
            body = body.push(self.side_panel());
        }

        column![self.toolbar(), body.height(Length::Fill)]
            .height(Length::Fill)
            .into()
    }

    fn toolbar(&self) -> Element<'_, Message> {
        let engine = self.session.engine();
        let (play_label, play_message) = match engine.phase() {
            PlaybackPhase::Idle => ("Start", Message::Start),
            PlaybackPhase::Running | PlaybackPhase::AutoPaused { .. } => ("Pause", Message::Pause),
            PlaybackPhase::ManualPaused => ("Resume", Message::Resume),
        };
        let play_button = if self.is_editing() {
            button(play_label)
        } else {
            button(play_label).on_press(play_message)
        };

        let speed = column![
            text(format!("Speed: {:.0}", engine.speed())).size(13.0),
            slider(MIN_SPEED..=MAX_SPEED, engine.speed(), Message::SpeedChanged).step(1.0)
        ]
        .spacing(2)
        .width(Length::Fixed(180.0));

        let settings_toggle = button(if self.session.config.show_settings {
            "Hide Settings"
        } else {
            "Settings"
        })
        .on_press(Message::ToggleSettings);
        let edit_toggle = button(if self.is_editing() {
            "Close Editor"
        } else {
            "Edit"
        })
        .on_press(Message::ToggleEdit);
        let theme_toggle = button(
            if matches!(
                self.session.config.theme,
                prompter_core::config::ThemeMode::Night
            ) {
                "Day Mode"
            } else {
                "Night Mode"
            },
        )
        .on_press(Message::ToggleTheme);

        let mut controls: Row<'_, Message> = row![
            play_button,
            button("Restart").on_press(Message::Restart),
            speed,
            text(engine.elapsed_label()),
            text(format!("{:.0}%", engine.progress() * 100.0)),
            text(self.status_label()),
            self.recording_indicator(),
            horizontal_space(),
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        if !self.session.references().is_empty() {
            controls = controls.push(
                button(if self.session.config.show_references {
                    "Hide References"
                } else {
                    "References"
                })
                .on_press(Message::ToggleReferences),
            );
        }
        controls = controls.push(settings_toggle).push(edit_toggle).push(theme_toggle);

        container(controls)
            .padding([8.0, SURFACE_PADDING_PX])
            .height(Length::Fixed(TOOLBAR_HEIGHT_PX))
            .width(Length::Fill)
            .into()
    }

    fn status_label(&self) -> String {
        let engine = self.session.engine();
        match engine.phase() {
            PlaybackPhase::Running => "Playing".to_string(),
            PlaybackPhase::AutoPaused { kind, .. } => format!("Paused ({kind})"),
            PlaybackPhase::ManualPaused => "Paused".to_string(),
            PlaybackPhase::Idle if engine.scroll_position() > 0.0 && engine.progress() >= 1.0 => {
                "Finished".to_string()
            }
            PlaybackPhase::Idle => "Ready".to_string(),
        }
    }

    fn recording_indicator(&self) -> Element<'_, Message> {
        let takes = self.takes.takes().len();
        match self.takes.active_elapsed() {
            Some(elapsed) => text(format!("● REC {}", format_elapsed(elapsed.as_secs())))
                .color(REC_COLOR)
                .into(),
            None if self.takes.is_armed() => text(format!("○ Armed · {takes} takes")).into(),
            None if takes > 0 => text(format!("{takes} takes")).into(),
            None => Space::with_width(Length::Shrink).into(),
        }
    }

    fn script_surface(&self) -> Element<'_, Message> {
        let engine = self.session.engine();
        let settings = engine.settings();
        let layout = engine.layout();
        let font = self.current_font();
        let text_color = self.text_color();
        let background = self.background_color();
        let line_height = LineHeight::Relative(settings.line_spacing);
        let size = settings.font_size as f32;
        let tag_color = Color {
            a: PAUSE_TAG_ALPHA,
            ..text_color
        };

        let spans: Vec<Span<'_, Message>> = self
            .session
            .segment_views()
            .into_iter()
            .filter_map(|segment| {
                let label = segment.label?;
                let span: Span<'_, Message> = Span::new(label)
                    .font(font)
                    .size(size)
                    .line_height(line_height);
                Some(match segment.kind {
                    SegmentKind::Text => span.color(text_color),
                    SegmentKind::Pause(_) if segment.triggered => span
                        .color(tag_color)
                        .background(Background::Color(Color {
                            a: 0.12,
                            ..text_color
                        })),
                    SegmentKind::Pause(_) | SegmentKind::TopicChange => span.color(tag_color),
                })
            })
            .collect();

        let rich: Rich<'_, Message> = Rich::with_spans(spans);
        let viewport = engine.viewport();
        let lead_in = viewport.height * LEAD_IN_FRACTION;
        let lead_out = viewport.height * (1.0 - layout.trigger_fraction);

        let script = column![
            Space::with_height(Length::Fixed(lead_in)),
            rich.width(Length::Fill).wrapping(Wrapping::WordOrGlyph),
            Space::with_height(Length::Fixed(lead_out)),
        ]
        .width(Length::Fill)
        .padding([0, settings.margin_horizontal]);

        let scroller = scrollable(script)
            .on_scroll(|viewport| Message::Scrolled {
                offset_y: viewport.absolute_offset().y,
                viewport_width: viewport.bounds().width,
                viewport_height: viewport.bounds().height,
            })
            .id(TEXT_SCROLL_ID.clone())
            .width(Length::Fill)
            .height(Length::Fill);

        let hint_size = (size * 0.6).max(12.0);
        let trigger_hint = column![
            Space::with_height(Length::Fixed(
                (layout.trigger_line() - hint_size / 2.0).max(0.0)
            )),
            text("▶").size(hint_size).color(Color {
                a: TRIGGER_HINT_ALPHA,
                ..text_color
            }),
        ];

        container(stack![scroller, trigger_hint])
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(background)),
                ..container::Style::default()
            })
            .into()
    }

    fn editor_view<'a>(&'a self, editor: &'a text_editor::Content) -> Element<'a, Message> {
        let markers = PauseKind::ALL
            .iter()
            .map(|kind| kind.token())
            .chain([TOPIC_CHANGE_TOKEN])
            .collect::<Vec<_>>()
            .join("  ");

        column![
            text(format!("Markers: {markers}")).size(13.0),
            text_editor(editor)
                .on_action(Message::EditorAction)
                .font(self.current_font())
                .height(Length::Fill),
            row![
                button("Apply").on_press(Message::ApplyEdit),
                button("Discard").on_press(Message::ToggleEdit),
            ]
            .spacing(8),
        ]
        .spacing(8)
        .height(Length::Fill)
        .into()
    }

    fn side_panel(&self) -> Element<'_, Message> {
        let mut panel: Column<'_, Message> = column![].spacing(16);
        if self.session.config.show_settings {
            panel = panel.push(self.settings_panel());
        }
        if self.session.config.show_references && !self.session.references().is_empty() {
            panel = panel.push(self.references_panel());
        }

        container(scrollable(panel))
            .padding(12)
            .width(Length::Fixed(SIDE_PANEL_WIDTH_PX))
            .height(Length::Fill)
            .into()
    }

    fn settings_panel(&self) -> Element<'_, Message> {
        let settings = self.session.engine().settings();
        let stats = self.session.stats();

        let family_picker = pick_list(
            FontFamily::ALL,
            Some(settings.font_family),
            Message::FontFamilyChanged,
        );
        let preset_picker = pick_list(
            ColorPreset::ALL,
            ColorPreset::matching(settings.text_color, settings.background_color),
            Message::ColorPresetSelected,
        )
        .placeholder("Custom");

        column![
            text("Presentation").size(20.0),
            row![text("Font"), family_picker]
                .spacing(8)
                .align_y(Vertical::Center),
            column![
                text(format!("Font size: {}", settings.font_size)),
                slider(
                    MIN_FONT_SIZE as f32..=MAX_FONT_SIZE as f32,
                    settings.font_size as f32,
                    |value| Message::FontSizeChanged(value.round() as u32),
                )
            ]
            .spacing(4),
            column![
                text(format!("Line spacing: {:.2}", settings.line_spacing)),
                slider(
                    MIN_LINE_SPACING..=MAX_LINE_SPACING,
                    settings.line_spacing,
                    Message::LineSpacingChanged,
                )
                .step(0.05)
            ]
            .spacing(4),
            column![
                text(format!("Side margin: {} px", settings.margin_horizontal)),
                slider(
                    0.0..=MAX_HORIZONTAL_MARGIN as f32,
                    settings.margin_horizontal as f32,
                    |value| Message::MarginHorizontalChanged(value.round() as u16),
                )
            ]
            .spacing(4),
            row![text("Colours"), preset_picker]
                .spacing(8)
                .align_y(Vertical::Center),
            checkbox("Show pause tags", settings.show_pause_tags)
                .on_toggle(Message::ShowPauseTagsToggled),
            text("Script").size(18.0),
            text(format!(
                "{} words, {} pauses, {} topic changes",
                stats.word_count, stats.pause_count, stats.topic_change_count
            )),
            text(format!(
                "Estimated read: {} (pauses {:.1} s)",
                format_elapsed(stats.estimated_read_secs.round() as u64),
                stats.pause_time_secs
            )),
        ]
        .spacing(12)
        .into()
    }

    fn references_panel(&self) -> Element<'_, Message> {
        let mut list: Column<'_, Message> = column![text("References").size(20.0)].spacing(10);
        for reference in self.session.references() {
            let mut entry: Column<'_, Message> = column![text(reference.title.as_str())];
            if let Some(url) = &reference.url {
                entry = entry.push(text(url.as_str()).size(12.0));
            }
            list = list.push(entry.spacing(2));
        }
        list.into()
    }
}
