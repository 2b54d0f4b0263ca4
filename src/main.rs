use iced::widget::{
    button, canvas, column, container, horizontal_space, image, row, scrollable, text, text_input,
    Column,
};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use iced::{event, time, window, Event};

use chrono::{Local, TimeZone};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::Duration;

mod audio;
mod confetti;
mod config;
mod countdown;
mod state;
mod ui;

use audio::Player;
use confetti::Confetti;
use countdown::TimeRemaining;
use state::guestbook::Guestbook;
use state::personalize::Personalization;
use state::store::Store;
use ui::gallery::{self, Photo};

/// Where the chosen gallery folder is remembered
const KEY_PHOTOS: &str = "bday:photos";

/// Frame cadence for the confetti banner (~60 Hz), independent of the
/// one-second countdown tick
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Main application state
struct BirthdayGift {
    /// Device-local persistence behind every saved field
    store: Store,
    /// Recipient, sender, target date
    personalization: Personalization,
    /// The wish board, most recent first
    guestbook: Guestbook,
    /// Latest countdown derivation, recomputed every tick
    remaining: TimeRemaining,
    /// Falling-confetti simulation over the hero banner
    confetti: Confetti,
    /// Background music intent and handle
    player: Player,
    /// Gallery photos (already thumbnailed)
    photos: Vec<Photo>,
    scanning_photos: bool,
    /// Guestbook form drafts
    note_author: String,
    note_text: String,
    /// Whether the full letter is expanded
    letter_open: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// One-second clock tick; drives the countdown
    Tick,
    /// Render-loop frame; drives the confetti
    Frame,
    /// The window width changed; the banner follows it
    WindowResized(f32),

    RecipientChanged(String),
    SenderChanged(String),
    TargetChanged(String),

    NoteAuthorChanged(String),
    NoteTextChanged(String),
    SubmitNote,

    ToggleMuted,
    TogglePlaying,
    ToggleLetter,

    /// User clicked the "Choose Photo Folder" button
    ChoosePhotoFolder,
    /// Background scan completed
    PhotosScanned(Vec<Photo>),
}

impl BirthdayGift {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let db_path = Store::default_path();
        let mut store = Store::open(&db_path);

        let personalization = Personalization::load(&mut store);
        let now = Local::now();
        let guestbook = Guestbook::load(
            &mut store,
            personalization.sender_name(),
            now.timestamp_millis(),
        );

        // First evaluation happens here, not on the first tick, so a target
        // already in the past celebrates immediately
        let remaining = countdown::remaining_for(personalization.target_iso(), now);

        let confetti = Confetti::new(
            config::CONFETTI_COUNT,
            1280.0,
            config::BANNER_HEIGHT,
            StdRng::from_entropy(),
        );

        let song_path = db_path
            .parent()
            .map(|dir| dir.join(config::SONG_FILE))
            .unwrap_or_else(|| PathBuf::from(config::SONG_FILE));
        let player = Player::from_song_file(&song_path);

        // Restore the gallery from the last chosen folder, if any
        let (scanning_photos, photo_task) = match store.get_opt::<String>(KEY_PHOTOS) {
            Some(folder) => (
                true,
                Task::perform(
                    gallery::scan_folder(PathBuf::from(folder)),
                    Message::PhotosScanned,
                ),
            ),
            None => (false, Task::none()),
        };

        log::info!(
            "🎁 Gift page ready for {} ({} wishes on the board)",
            personalization.recipient_name(),
            guestbook.entries().len()
        );

        (
            BirthdayGift {
                store,
                personalization,
                guestbook,
                remaining,
                confetti,
                player,
                photos: Vec::new(),
                scanning_photos,
                note_author: String::new(),
                note_text: String::new(),
                letter_open: false,
            },
            photo_task,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                self.remaining =
                    countdown::remaining_for(self.personalization.target_iso(), Local::now());
                Task::none()
            }
            Message::Frame => {
                self.confetti.advance();
                Task::none()
            }
            Message::WindowResized(width) => {
                self.confetti.set_width(width);
                Task::none()
            }

            Message::RecipientChanged(value) => {
                self.personalization
                    .set_recipient_name(&mut self.store, value);
                Task::none()
            }
            Message::SenderChanged(value) => {
                self.personalization.set_sender_name(&mut self.store, value);
                Task::none()
            }
            Message::TargetChanged(value) => {
                self.personalization.set_target_iso(&mut self.store, value);
                // Re-derive right away instead of waiting up to a second
                self.remaining =
                    countdown::remaining_for(self.personalization.target_iso(), Local::now());
                Task::none()
            }

            Message::NoteAuthorChanged(value) => {
                self.note_author = value;
                Task::none()
            }
            Message::NoteTextChanged(value) => {
                self.note_text = value;
                Task::none()
            }
            Message::SubmitNote => {
                let accepted = self
                    .guestbook
                    .submit(
                        &mut self.store,
                        &self.note_author,
                        &self.note_text,
                        self.personalization.sender_name(),
                        Local::now().timestamp_millis(),
                    )
                    .is_some();
                // A rejected submission leaves the form as-is; that is the
                // only feedback
                if accepted {
                    self.note_author.clear();
                    self.note_text.clear();
                }
                Task::none()
            }

            Message::ToggleMuted => {
                self.player.toggle_muted();
                Task::none()
            }
            Message::TogglePlaying => {
                self.player.toggle_playing();
                Task::none()
            }
            Message::ToggleLetter => {
                self.letter_open = !self.letter_open;
                Task::none()
            }

            Message::ChoosePhotoFolder => {
                let folder = FileDialog::new()
                    .set_title("Select Folder with Photos")
                    .pick_folder();

                if let Some(folder) = folder {
                    self.store
                        .set(KEY_PHOTOS, &folder.to_string_lossy().to_string());
                    self.scanning_photos = true;
                    return Task::perform(gallery::scan_folder(folder), Message::PhotosScanned);
                }
                Task::none()
            }
            Message::PhotosScanned(photos) => {
                self.scanning_photos = false;
                self.photos = photos;
                Task::none()
            }
        }
    }

    /// Periodic drivers: the 1 s countdown tick, the confetti frame loop,
    /// and window resizes. All are cancelled by iced when the app winds
    /// down.
    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            time::every(Duration::from_secs(1)).map(|_| Message::Tick),
            time::every(FRAME_INTERVAL).map(|_| Message::Frame),
            event::listen_with(handle_event),
        ])
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let content: Column<Message> = column![
            self.view_top_bar(),
            self.view_banner(),
            self.view_hero(),
            self.view_countdown(),
            self.view_gallery(),
            self.view_letter(),
            self.view_guestbook(),
            self.view_footer(),
        ]
        .spacing(28)
        .padding(24)
        .max_width(980);

        scrollable(container(content).center_x(Length::Fill)).into()
    }

    fn view_top_bar(&self) -> Element<Message> {
        let playback = self.player.state();
        row![
            text(format!("🎁 for {}", self.personalization.recipient_name())).size(18),
            horizontal_space(),
            button(text(if playback.muted { "🔇 Unmute" } else { "🔊 Mute" }).size(14))
                .style(button::secondary)
                .on_press(Message::ToggleMuted),
            button(text(if playback.playing { "⏸ Pause" } else { "▶ Play" }).size(14))
                .style(button::secondary)
                .on_press(Message::TogglePlaying),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
    }

    fn view_banner(&self) -> Element<Message> {
        canvas(ui::canvas::ConfettiView {
            confetti: &self.confetti,
        })
        .width(Length::Fill)
        .height(Length::Fixed(config::BANNER_HEIGHT))
        .into()
    }

    fn view_hero(&self) -> Element<Message> {
        let personalize_card = container(
            column![
                text("📅 Personalize").size(16),
                text("Make it truly yours — saved to this device only.").size(12),
                row![
                    text_input("Recipient name", self.personalization.recipient_name())
                        .on_input(Message::RecipientChanged),
                    text_input("Your name", self.personalization.sender_name())
                        .on_input(Message::SenderChanged),
                    text_input("YYYY-MM-DDTHH:mm:ss", self.personalization.target_iso())
                        .on_input(Message::TargetChanged),
                ]
                .spacing(8),
                text("Tip: Use local time. Example: 2025-09-12T00:00:00").size(11),
            ]
            .spacing(8),
        )
        .style(container::rounded_box)
        .padding(16);

        column![
            text(format!(
                "{} {}",
                config::HERO_TEXT,
                self.personalization.recipient_name()
            ))
            .size(44),
            text(config::SUB_TEXT).size(16),
            text(format!("💖 Turning {} — forever my favorite person", config::AGE_TURNING))
                .size(13),
            personalize_card,
        ]
        .spacing(12)
        .into()
    }

    fn view_countdown(&self) -> Element<Message> {
        let subtitle = match countdown::parse_target(self.personalization.target_iso()) {
            Some(target) => format!("Counting down to {}", target.format("%B %e, %Y %H:%M")),
            None => "That date doesn't parse — so it's today!".to_owned(),
        };

        let units = row![
            countdown_unit(self.remaining.days, "Days"),
            countdown_unit(self.remaining.hours, "Hours"),
            countdown_unit(self.remaining.minutes, "Minutes"),
            countdown_unit(self.remaining.seconds, "Seconds"),
        ]
        .spacing(12);

        let mut section =
            column![text("⏳ Countdown").size(24), text(subtitle).size(13), units].spacing(12);

        if self.remaining.reached {
            section = section.push(
                text(format!(
                    "It's your day, {}! 🎉",
                    self.personalization.recipient_name()
                ))
                .size(20),
            );
        }

        section.into()
    }

    fn view_gallery(&self) -> Element<Message> {
        let mut section = column![
            text("📷 Memories Gallery").size(24),
            text("A little scrapbook of our moments").size(13),
        ]
        .spacing(12);

        if self.photos.is_empty() {
            let hint = if self.scanning_photos {
                "Loading photos…"
            } else {
                "No photos yet — pick a folder of memories."
            };
            section = section.push(text(hint).size(14));
        } else {
            let thumbnails: Vec<Element<Message>> = self
                .photos
                .iter()
                .map(|photo| {
                    image(photo.thumbnail.clone())
                        .width(Length::Fixed(180.0))
                        .into()
                })
                .collect();
            section = section.push(
                iced_aw::Wrap::with_elements(thumbnails)
                    .spacing(10.0)
                    .line_spacing(10.0),
            );
        }

        section
            .push(
                button(text("Choose Photo Folder").size(14))
                    .style(button::secondary)
                    .on_press(Message::ChoosePhotoFolder),
            )
            .into()
    }

    fn view_letter(&self) -> Element<Message> {
        let toggle_label = if self.letter_open {
            "Close Letter"
        } else {
            "✨ Read Full Letter"
        };

        let mut section = column![
            text("💌 Open Letter").size(24),
            text("A small note from my heart").size(13),
        ]
        .spacing(12);

        if self.letter_open {
            let mut letter = Column::new().spacing(10).padding(16);
            for paragraph in self.letter_paragraphs() {
                letter = letter.push(text(paragraph).size(15));
            }
            section = section.push(container(letter).style(container::rounded_box));
        }

        section
            .push(
                button(text(toggle_label).size(14))
                    .style(button::primary)
                    .on_press(Message::ToggleLetter),
            )
            .into()
    }

    fn view_guestbook(&self) -> Element<Message> {
        let note_placeholder = format!(
            "Write something for {}…",
            self.personalization.recipient_name()
        );

        let form = container(
            column![
                text("Add your wish").size(16),
                text("Your note stays on this device.").size(12),
                text_input("Your name", &self.note_author).on_input(Message::NoteAuthorChanged),
                text_input(&note_placeholder, &self.note_text)
                    .on_input(Message::NoteTextChanged)
                    .on_submit(Message::SubmitNote),
                button(text("Send").size(14))
                    .style(button::primary)
                    .on_press(Message::SubmitNote),
            ]
            .spacing(8),
        )
        .style(container::rounded_box)
        .padding(16);

        let mut wishes = Column::new().spacing(10);
        for entry in self.guestbook.entries() {
            wishes = wishes.push(
                container(
                    column![
                        row![
                            text(entry.author.as_str()).size(14),
                            horizontal_space(),
                            text(format_timestamp(entry.created_at_ms)).size(11),
                        ]
                        .align_y(Alignment::Center),
                        text(entry.text.as_str()).size(14),
                    ]
                    .spacing(6),
                )
                .style(container::rounded_box)
                .padding(12)
                .width(Length::Fill),
            );
        }

        column![
            text("💝 Wish Board").size(24),
            text("Leave a little message").size(13),
            form,
            wishes,
        ]
        .spacing(12)
        .into()
    }

    fn view_footer(&self) -> Element<Message> {
        text(format!(
            "Made with ♥ for {}",
            self.personalization.recipient_name()
        ))
        .size(13)
        .into()
    }

    fn letter_paragraphs(&self) -> Vec<String> {
        config::LETTER_PARAGRAPHS
            .iter()
            .map(|p| {
                p.replace("{name}", self.personalization.recipient_name())
                    .replace("{from}", self.personalization.sender_name())
            })
            .collect()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::CatppuccinLatte
    }
}

/// One big padded number over its unit label
fn countdown_unit(value: u64, label: &str) -> Element<'static, Message> {
    container(
        column![
            text(format!("{value:02}")).size(52),
            text(label.to_owned()).size(11),
        ]
        .spacing(4)
        .align_x(Alignment::Center),
    )
    .style(container::rounded_box)
    .padding(20)
    .into()
}

fn format_timestamp(ms: i64) -> String {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.format("%b %e, %Y %H:%M").to_string())
        .unwrap_or_default()
}

fn handle_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(size.width)),
        _ => None,
    }
}

fn main() -> iced::Result {
    // Keep the handle alive for the whole run; dropping it shuts logging down
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
        .ok();

    iced::application("Birthday Gift", BirthdayGift::update, BirthdayGift::view)
        .subscription(BirthdayGift::subscription)
        .theme(BirthdayGift::theme)
        .window_size((1280.0, 900.0))
        .centered()
        .run_with(BirthdayGift::new)
}
