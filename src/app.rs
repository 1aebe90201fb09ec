// src/app.rs
//
// Couche application : état persistant (historique, thème), branchement
// eframe (restauration au démarrage, sauvegarde périodique), composition
// des panneaux.

use eframe::egui;

pub mod etat;
pub mod historique;
pub mod vue;

pub use etat::AppCalc;

impl AppCalc {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        if let Some(stockage) = cc.storage {
            if let Some(app) = eframe::get_value(stockage, eframe::APP_KEY) {
                return app;
            }
        }
        AppCalc::default()
    }
}

impl eframe::App for AppCalc {
    fn save(&mut self, stockage: &mut dyn eframe::Storage) {
        eframe::set_value(stockage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.sombre {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        self.clavier(ctx);

        if self.panneau_historique {
            egui::SidePanel::right("historique")
                .default_width(220.0)
                .show(ctx, |ui| self.ui_historique(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| self.ui(ui));
    }
}
