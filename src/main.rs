use std::time::Duration;

use clap::Parser;
use log::info;
use pixels::{Pixels, SurfaceTexture};
use winit::{
    event::{ElementState, Event, VirtualKeyCode, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use dotmatrix_core::{
    cartridge::Cartridge,
    diagnostics::{self, CoreEvent, EventSink},
    gameboy::GameBoy,
    ppu::{SCREEN_HEIGHT, SCREEN_WIDTH},
};

const SCALE: u32 = 3;

/// Reports core events through the `log` facade.
struct LogBridge;

impl EventSink for LogBridge {
    fn on_event(&self, event: CoreEvent<'_>) {
        match event {
            CoreEvent::RomLoaded { title, size } => {
                log::info!(target: "mmu", "loaded ROM: {title} ({size} bytes)");
            }
            CoreEvent::IllegalOpcode { opcode, pc } => {
                log::warn!(target: "cpu", "unhandled opcode {opcode:02X} at PC={pc:04X}");
            }
        }
    }
}

#[derive(Parser)]
struct Args {
    /// Path to ROM file
    rom: Option<std::path::PathBuf>,

    /// Enable debug logging of CPU state
    #[arg(long)]
    debug: bool,

    /// Run without opening a window
    #[arg(long)]
    headless: bool,

    /// Number of frames to run in headless mode
    #[arg(long)]
    frames: Option<usize>,

    /// Number of seconds to run in headless mode
    #[arg(long)]
    seconds: Option<u64>,

    /// Number of CPU cycles to run in headless mode
    #[arg(long)]
    cycles: Option<u64>,
}

fn main() {
    env_logger::init();
    let _ = diagnostics::try_set_event_sink(Box::new(LogBridge));
    let args = Args::parse();

    info!("Starting emulator");

    let rom_path = match args.rom {
        Some(p) => p,
        None => {
            eprintln!("No ROM supplied");
            std::process::exit(1);
        }
    };

    let cart = match Cartridge::from_file(&rom_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load ROM: {e}");
            std::process::exit(1);
        }
    };

    let mut gb = GameBoy::new();
    gb.load_cart(cart);

    let mut frame = vec![0u32; SCREEN_WIDTH * SCREEN_HEIGHT];
    let mut frame_count = 0u64;

    if !args.headless {
        let event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_title("dotmatrix")
            .with_inner_size(winit::dpi::LogicalSize::new(
                (SCREEN_WIDTH as u32 * SCALE) as f64,
                (SCREEN_HEIGHT as u32 * SCALE) as f64,
            ))
            .build(&event_loop)
            .expect("Failed to create window");

        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, surface)
            .expect("Pixels error");

        let debug = args.debug;

        event_loop.run(move |event, _, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                    WindowEvent::Resized(size) => {
                        let _ = pixels.resize_surface(size.width, size.height);
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        if input.virtual_keycode == Some(VirtualKeyCode::Escape)
                            && input.state == ElementState::Pressed
                        {
                            *control_flow = ControlFlow::Exit;
                        }
                    }
                    _ => {}
                },
                Event::MainEventsCleared => {
                    gb.run_frame();
                    gb.render_frame(&mut frame);
                    window.request_redraw();

                    if debug && frame_count % 60 == 0 {
                        println!("{}", gb.cpu.debug_state());
                    }

                    frame_count += 1;
                }
                Event::RedrawRequested(_) => {
                    for (dst, &src) in pixels.frame_mut().chunks_exact_mut(4).zip(frame.iter()) {
                        dst[0] = (src >> 16) as u8;
                        dst[1] = (src >> 8) as u8;
                        dst[2] = src as u8;
                        dst[3] = 0xFF;
                    }
                    if pixels.render().is_err() {
                        *control_flow = ControlFlow::Exit;
                    }
                }
                _ => {}
            }
        });
    } else {
        let frame_limit = args.frames;
        let cycle_limit = args.cycles;
        let second_limit = args.seconds.map(Duration::from_secs);

        let start = std::time::Instant::now();
        loop {
            gb.run_frame();
            gb.render_frame(&mut frame);

            if args.debug && frame_count % 60 == 0 {
                println!("{}", gb.cpu.debug_state());
            }

            frame_count += 1;

            if let Some(max) = frame_limit {
                if frame_count >= max as u64 {
                    break;
                }
            }
            if let Some(max) = cycle_limit {
                if gb.cpu.cycles >= max {
                    break;
                }
            }
            if let Some(limit) = second_limit {
                if start.elapsed() >= limit {
                    break;
                }
            }
        }
    }
}
