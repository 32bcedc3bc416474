#![windows_subsystem = "windows"]

mod cards;
mod chart;
mod gauge;
mod hypnogram;
mod preferences;
mod reorder;
mod samples;
mod scrub;
pub mod theme;
mod ui;

use ui::Vital;

fn main() -> iced::Result {
    iced::application(Vital::title, Vital::update, Vital::view)
        .subscription(Vital::subscription)
        .theme(Vital::theme)
        .window(iced::window::Settings {
            size: (480.0, 820.0).into(),
            #[cfg(target_os = "linux")]
            platform_specific: iced::window::settings::PlatformSpecific {
                application_id: String::from("vital"),
                ..Default::default()
            },
            ..Default::default()
        })
        .run_with(|| (Vital::new(), iced::Task::none()))
}
