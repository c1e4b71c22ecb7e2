//! Screen Recorder: pick a screen from the tray, record it with desktop
//! audio and microphone, get an MP4 in the recordings folder.

mod app;
mod app_command;
mod config;
mod desktop_media;
mod desktop_sources;
mod error;
mod ffmpeg;
mod ffmpeg_recorder;
mod hotkey_handler;
mod logging;
mod main_thread_sink;
#[cfg(test)]
mod tests;
mod thumbnails;
mod tray_command;
mod tray_icon_state;
mod tray_manager;
mod tray_ui;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    desktop_media::DesktopMediaDevices,
    desktop_sources::DesktopSources,
    error::{AppError, Result as AppResult},
    ffmpeg::{CapturePlatform, FfmpegCommand},
    ffmpeg_recorder::{FfmpegRecorder, FfmpegSettings},
    hotkey_handler::HotkeyHandler,
    main_thread_sink::MainThreadSink,
    thumbnails::{ThumbnailGrabber, ThumbnailingHost},
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
    tray_ui::TrayUi,
};

use crate::config::Config;

use screen_recorder_core::{
    DownloadDirectory, Host, HostBridge, HostRequest, SelectionNotifier, UiController,
};

use global_hotkey::GlobalHotKeyManager;
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

/// Application entry point.
fn main() {
    let log_guard = logging::init_logging();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let tray_manager = match TrayManager::new() {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };
    let menu_ids = tray_manager.menu_ids().clone();

    let platform = CapturePlatform::current();
    let command = FfmpegCommand::new(platform, config.capture.fps);

    // The privileged host: monitor enumeration and the source menu both
    // need the event loop thread, so the host is served from it.
    let (host_event_tx, host_event_rx) = mpsc::unbounded_channel();
    let mut host = Host::new(
        DesktopSources::new(),
        tray_manager,
        SelectionNotifier::new(host_event_tx),
    );

    let mut startup = Some((config, command, host_event_rx, menu_ids));

    // Persists across event loop iterations; dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => match cmd {
                TrayCommand::SetState(state) => {
                    if let Err(e) = host.presenter_mut().update_state(state) {
                        error!(error = ?e, "Failed to update tray icon");
                    }
                }
                TrayCommand::Preview { label, thumbnail } => {
                    if let Err(e) = host.presenter_mut().show_preview(label, thumbnail) {
                        error!(error = ?e, "Failed to show preview");
                    }
                }
                TrayCommand::Host(request) => {
                    if matches!(request, HostRequest::GetSources { .. }) {
                        host.backend_mut().refresh(target.available_monitors());
                    }
                    host.handle(request);
                }
                TrayCommand::MenuActivated(id) => host.presenter_mut().activate(&id),
                TrayCommand::Shutdown => {
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
            },
            Event::NewEvents(StartCause::Init) => {
                let Some((config, command, host_event_rx, menu_ids)) = startup.take() else {
                    return;
                };

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let (command_tx, command_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);

                // Register hotkey on the main thread; tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                let hotkey_id = match HotkeyHandler::register_hotkey() {
                    Ok((manager, id)) => {
                        hotkey_manager = Some(manager);
                        Some(id)
                    }
                    Err(e) => {
                        warn!(error = ?e, "Hotkey unavailable, use the tray menu");
                        None
                    }
                };

                let tray_proxy = tray_proxy.clone();

                // Spawn tokio runtime on separate thread.
                // Host, TrayManager and hotkey_manager stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let (recorder_tx, recorder_rx) = mpsc::unbounded_channel();
                        let recordings_dir = config.recording.output_dir.clone();

                        // Frame grabs run here so the event loop never waits on ffmpeg.
                        let thumbnails = (config.capture.thumbnail_width > 0).then(|| {
                            ThumbnailGrabber::new(
                                config.capture.ffmpeg_path.clone(),
                                command.clone(),
                                config.capture.thumbnail_width,
                                config.capture.thumbnail_timeout(),
                            )
                        });

                        let controller = UiController::new(
                            ThumbnailingHost::new(
                                HostBridge::new(MainThreadSink::new(tray_proxy.clone())),
                                thumbnails,
                            ),
                            DesktopMediaDevices::new(config.audio.clone(), command.platform()),
                            FfmpegRecorder::new(FfmpegSettings {
                                ffmpeg_path: config.capture.ffmpeg_path.clone(),
                                command,
                                segment_bytes: config.recording.segment_bytes,
                                stop_timeout: config.capture.stop_timeout(),
                            }),
                            TrayUi::new(tray_proxy.clone()),
                            DownloadDirectory::new(recordings_dir.clone()),
                            recorder_tx,
                        )
                        .with_file_name(config.recording.file_name.clone());

                        let app = App {
                            controller,
                            tray_proxy,
                            command_rx,
                            host_events: host_event_rx,
                            recorder_events: recorder_rx,
                            shutdown_tx,
                            menu_ids,
                            recordings_dir,
                        };

                        info!(output_dir = ?config.recording.output_dir, "Recordings folder");

                        tokio::join!(
                            async {
                                let Some(hotkey_id) = hotkey_id else {
                                    return;
                                };
                                let hotkey_handler = HotkeyHandler::new(hotkey_id, command_tx);
                                if let Err(e) = hotkey_handler.run(shutdown_rx).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            },
                            async {
                                if let Err(e) = app.run().await {
                                    error!(error = ?e, "App error");
                                }
                            }
                        );
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_manager and the log writer alive for the app's lifetime.
        let _ = (&hotkey_manager, &log_guard);
    });
}
