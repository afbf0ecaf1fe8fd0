// src/app.rs
//
// Bissection : module App (racine)
// --------------------------------
// - Sous-modules : etat.rs (état, sans calcul) + vue.rs (egui, appels au noyau)
// - Ré-export AppBissection pour main.rs
// - impl eframe::App (natif + web)

pub mod etat;
pub mod vue;

pub use etat::AppBissection;

use eframe::egui;

impl eframe::App for AppBissection {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = bouton "Réinitialiser". Enter est géré dans vue.rs (champ focus).
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.reinitialiser();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
