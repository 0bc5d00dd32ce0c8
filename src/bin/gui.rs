#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use hvac_sizing_toolbox::{
    config,
    form::{Field, FormState},
    i18n::{self, keys, Translator},
    render::{self, HintView, SizingView},
    session::{self, FormEvent, SizingOutcome},
    ventilation::ComfortHint,
};
use image::GenericImageView;
use std::{fs, path::Path, path::PathBuf};

#[derive(Parser)]
#[command(name = "hvac_sizing_toolbox")]
struct GuiArgs {
    /// Language: auto, de, en, ko
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    /// Path to the configuration file
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,
}

fn main() -> Result<(), eframe::Error> {
    let args = GuiArgs::parse();
    let mut app_cfg = match config::load_from(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Config error: {e}");
            config::Config::default()
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(app_cfg.tracing_level())
        .with_writer(std::io::stderr)
        .init();
    if args.lang != "auto" {
        app_cfg.language = i18n::resolve_language(&args.lang, Some(app_cfg.language.as_str()));
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([760.0, 640.0]);
    if app_cfg.window_alpha < 1.0 {
        viewport = viewport.with_transparent(true);
    }
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let title = Translator::new(&i18n::resolve_language("auto", Some(app_cfg.language.as_str())))
        .t(keys::APP_TITLE)
        .to_string();
    let config_path = args.config;
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            if let Some(path) = app_cfg.font_path.as_deref() {
                if let Err(e) = load_custom_font(&cc.egui_ctx, path) {
                    tracing::warn!("{e}");
                }
            }
            Box::new(GuiApp::new(app_cfg, config_path))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 설정에 지정한 폰트를 egui에 등록한다. 기본 폰트에 없는 한글 표시용.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

fn hint_color(severity: ComfortHint) -> egui::Color32 {
    match severity {
        ComfortHint::Critical => egui::Color32::from_rgb(210, 45, 45),
        ComfortHint::Warning => egui::Color32::from_rgb(225, 150, 0),
        ComfortHint::None => egui::Color32::GRAY,
    }
}

fn hint_label(ui: &mut egui::Ui, hint: Option<&HintView>) {
    if let Some(h) = hint {
        ui.colored_label(hint_color(h.severity), h.message.as_str());
    }
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: Translator,
    form: FormState,
    outcome: SizingOutcome,
    view: SizingView,
    lang_input: String,
    save_status: Option<String>,
    window_alpha: f32,
    always_on_top: bool,
    show_settings_modal: bool,
    show_formula_modal: bool,
}

impl GuiApp {
    fn new(config: config::Config, config_path: PathBuf) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let mut form = config.initial_inputs.to_form();
        let outcome = session::handle_event(&mut form, FormEvent::PageLoaded);
        let view = render::render(&outcome, &tr);
        Self {
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            always_on_top: config.always_on_top,
            config,
            config_path,
            tr,
            form,
            outcome,
            view,
            save_status: None,
            show_settings_modal: false,
            show_formula_modal: false,
        }
    }

    fn on_event(&mut self, event: FormEvent) {
        self.outcome = session::handle_event(&mut self.form, event);
        self.view = render::render(&self.outcome, &self.tr);
    }

    fn on_slider(&mut self, flow_m3_per_h: f64) {
        self.outcome = session::move_slider(&mut self.form, flow_m3_per_h);
        self.view = render::render(&self.outcome, &self.tr);
    }

    fn apply_language(&mut self) {
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.view = render::render(&self.outcome, &self.tr);
    }

    /// 입력 칸 묶음을 그리고, 하나라도 바뀌었으면 true.
    fn field_rows(&mut self, ui: &mut egui::Ui, rows: &[(Field, &str)]) -> bool {
        let mut changed = false;
        for (field, label_key) in rows {
            ui.label(self.tr.t(label_key));
            let edit = egui::TextEdit::singleline(self.form.field_mut(*field)).desired_width(120.0);
            changed |= ui.add(edit).changed();
            ui.end_row();
        }
        changed
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::GUI_INPUTS_HEADING));
        let mut room_changed = false;
        egui::Grid::new("room_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                room_changed = self.field_rows(
                    ui,
                    &[
                        (Field::RoomArea, keys::FIELD_ROOM_AREA),
                        (Field::RoomHeight, keys::FIELD_ROOM_HEIGHT),
                        (Field::HeatingLoad, keys::FIELD_HEATING_LOAD),
                        (Field::CoolingLoad, keys::FIELD_COOLING_LOAD),
                        (Field::RoomTemperature, keys::FIELD_ROOM_TEMPERATURE),
                    ],
                );
            });
        if room_changed {
            self.on_event(FormEvent::RoomInputChanged);
        }
        if let Some(rec) = &self.view.recommended_flow {
            ui.label(format!("{} {rec}", self.tr.t(keys::RESULT_RECOMMENDED_FLOW)));
        }
    }

    fn ui_flow(&mut self, ui: &mut egui::Ui) {
        let mut range_changed = false;
        egui::Grid::new("range_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                range_changed = self.field_rows(
                    ui,
                    &[
                        (Field::VolumeFlowMin, keys::FIELD_FLOW_MIN),
                        (Field::VolumeFlowMax, keys::FIELD_FLOW_MAX),
                    ],
                );
            });
        if range_changed {
            self.on_event(FormEvent::RangeBoundsChanged);
        }
        if let Some(notice) = &self.view.range_notice {
            ui.small(notice.as_str());
        }

        let range = self.form.slider_range;
        let mut flow = self.form.slider;
        let slider = egui::Slider::new(&mut flow, range.min_m3_per_h..=range.max_m3_per_h)
            .step_by(1.0)
            .suffix(" m³/h")
            .text(self.tr.t(keys::FIELD_FLOW));
        if ui.add(slider).changed() {
            self.on_slider(flow);
        }
        if let Some(ach) = &self.view.air_change {
            ui.label(ach.as_str());
        }
    }

    fn ui_results(&self, ui: &mut egui::Ui) {
        egui::Grid::new("result_grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label(self.tr.t(keys::RESULT_VOLUME_FLOW));
                ui.strong(format!("{} m³/h", self.view.volume_flow));
                ui.end_row();
                ui.label(self.tr.t(keys::RESULT_SUPPLY_HEATING));
                ui.strong(self.view.supply_heating.as_str());
                ui.end_row();
                ui.label(self.tr.t(keys::RESULT_SUPPLY_COOLING));
                ui.strong(self.view.supply_cooling.as_str());
                ui.end_row();
            });
        hint_label(ui, self.view.heating_hint.as_ref());
        hint_label(ui, self.view.cooling_hint.as_ref());
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let mut save_clicked = false;
        let tr = self.tr.clone();
        egui::Window::new(tr.t(keys::GUI_SETTINGS_TITLE))
            .collapsible(false)
            .resizable(true)
            .open(&mut self.show_settings_modal)
            .show(ctx, |ui| {
                ui.label(tr.t(keys::GUI_SETTINGS_LANGUAGE));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.as_str())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.lang_input,
                            "auto".into(),
                            tr.t(keys::GUI_SETTINGS_LANGUAGE_AUTO),
                        );
                        ui.selectable_value(&mut self.lang_input, "de-de".into(), "Deutsch");
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                        ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                    });
                ui.separator();
                ui.checkbox(&mut self.always_on_top, tr.t(keys::GUI_SETTINGS_ALWAYS_ON_TOP));
                ui.label(tr.t(keys::GUI_SETTINGS_ALPHA));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                ui.separator();
                if ui.button(tr.t(keys::GUI_SETTINGS_SAVE)).clicked() {
                    save_clicked = true;
                }
                if let Some(msg) = &self.save_status {
                    ui.label(msg.as_str());
                }
            });
        if save_clicked {
            self.save_settings();
        }
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        self.config.always_on_top = self.always_on_top;
        self.apply_language();
        self.save_status = Some(match self.config.save_to(&self.config_path) {
            Ok(()) => tr_saved(&self.tr),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }
}

fn tr_saved(tr: &Translator) -> String {
    format!("{} {}", tr.t(keys::SETTINGS_SAVED), tr.language_code())
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(self.tr.t(keys::GUI_FORMULA_BUTTON)).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(self.tr.t(keys::GUI_SETTINGS_TITLE)).clicked() {
                    self.show_settings_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        if self.show_formula_modal {
            let body = self.tr.t(keys::GUI_FORMULA_BODY).to_string();
            egui::Window::new(self.tr.t(keys::GUI_FORMULA_BUTTON))
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.monospace(body);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    egui::Frame::group(ui.style()).show(ui, |ui| self.ui_inputs(ui));
                    ui.add_space(8.0);
                    egui::Frame::group(ui.style()).show(ui, |ui| self.ui_flow(ui));
                    ui.add_space(8.0);
                    egui::Frame::group(ui.style()).show(ui, |ui| self.ui_results(ui));
                });
        });
    }
}
