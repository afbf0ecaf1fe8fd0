// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// - Saisies f(x), a, b, tolérance ; Enter (champ focus) ou "Calculer" lance le noyau
// - Navigation ◀ / ▶ + clic sur une ligne du tableau ; détail a, b, c, f(c), b - a
// - Tracé peint à la main (Painter) : courbe échantillonnée, axe x, marqueurs a/b/c,
//   zoom au glisser + bouton de retour à la vue complète
// - Démarche rédigée + jetons / RPN de l’expression
//
// Aucune arithmétique ici : tout ce qui est numérique vient de crate::noyau.

use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke};

use super::etat::AppBissection;
use crate::noyau::courbe::{echantillonner, echantillonner_sur, Courbe};
use crate::noyau::demarche::rediger;
use crate::noyau::format::{
    exporter_csv, format_fixe, ligne_tabulaire, resume_iteration, ENTETES,
};
use crate::noyau::parametres::Parametres;
use crate::noyau::Probleme;

const COULEUR_A: Color32 = Color32::from_rgb(52, 120, 246);
const COULEUR_B: Color32 = Color32::from_rgb(220, 60, 60);
const COULEUR_C: Color32 = Color32::from_rgb(40, 170, 90);
const COULEUR_FINALE: Color32 = Color32::from_rgb(240, 160, 20);

const HAUTEUR_TRACE: f32 = 300.0;

impl AppBissection {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Méthode de bissection");
                ui.add_space(6.0);

                self.ui_saisies(ui);

                if !self.erreur.is_empty() {
                    ui.add_space(6.0);
                    ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
                }

                if self.resultat.is_none() {
                    return;
                }

                ui.add_space(8.0);
                ui.separator();
                self.ui_navigation(ui);
                self.ui_trace(ui);

                ui.add_space(8.0);
                ui.separator();
                self.ui_tableau(ui);

                ui.add_space(8.0);
                ui.separator();
                self.ui_demarche(ui);
            });
    }

    fn ui_saisies(&mut self, ui: &mut egui::Ui) {
        let mut entree = false;

        egui::Grid::new("saisies_bissection")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("f(x) =");
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut self.fonction)
                        .desired_width(360.0)
                        .hint_text("Ex: x^3 - x - 2, cos(x) - x, 2x^2 - 1")
                        .id_salt("saisie_fonction")
                        .code_editor(),
                );
                if self.focus_fonction {
                    resp.request_focus();
                    self.focus_fonction = false;
                }
                entree |= Self::valide(ui, &resp);
                ui.end_row();

                for (titre, id, champ) in [
                    ("a =", "saisie_a", &mut self.a),
                    ("b =", "saisie_b", &mut self.b),
                    ("tolérance =", "saisie_tolerance", &mut self.tolerance),
                ] {
                    ui.label(titre);
                    let resp = ui.add(
                        egui::TextEdit::singleline(champ)
                            .desired_width(140.0)
                            .id_salt(id),
                    );
                    entree |= Self::valide(ui, &resp);
                    ui.end_row();
                }
            });

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let calculer = ui
                .add_sized([96.0, 30.0], egui::Button::new("Calculer"))
                .on_hover_text("Lance la bissection (Enter)");
            if calculer.clicked() || entree {
                self.calculer_via_noyau();
            }

            let reset = ui
                .add_sized([112.0, 30.0], egui::Button::new("Réinitialiser"))
                .on_hover_text("Valeurs par défaut (Échap)");
            if reset.clicked() {
                self.reinitialiser();
            }

            let copier = ui
                .add_enabled(self.resultat.is_some(), egui::Button::new("Copier CSV"))
                .on_hover_text("Copie le tableau des itérations dans le presse-papiers");
            if copier.clicked() {
                if let Some(r) = &self.resultat {
                    ui.ctx()
                        .copy_text(exporter_csv(r, Parametres::default().precision));
                }
            }
        });
    }

    /// Enter dans un champ focus (perte de focus au même frame).
    fn valide(ui: &egui::Ui, resp: &egui::Response) -> bool {
        resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
    }

    /// Analyse + exécution ; dépose le résultat ou l’erreur (texte verbatim).
    fn calculer_via_noyau(&mut self) {
        let params = Parametres::default();
        let calcul = Probleme::lire(&self.fonction, &self.a, &self.b, &self.tolerance)
            .and_then(|p| p.resoudre_avec(&params).map(|r| (p, r)));

        match calcul {
            Ok((probleme, resultat)) => {
                let demarche = rediger(&resultat, params.precision);
                self.set_resultats(probleme, resultat, demarche);
            }
            Err(e) => {
                tracing::info!(erreur = %e, "calcul refusé");
                self.set_erreur(e.to_string());
            }
        }
        self.focus_fonction = true;
    }

    fn ui_navigation(&mut self, ui: &mut egui::Ui) {
        let n = self.nb_iterations();
        let Some(r) = &self.resultat else {
            return;
        };
        let precision = Parametres::default().precision;
        let racine = format_fixe(r.racine(), precision);
        let arret = r.arret().description();
        let detail = r
            .iteration(self.index)
            .map(|it| resume_iteration(it, precision))
            .unwrap_or_default();

        ui.horizontal(|ui| {
            let prec = ui.add_enabled(self.index > 0, egui::Button::new("◀"));
            ui.monospace(format!("Itération {} / {n}", self.index + 1));
            let suiv = ui.add_enabled(self.index + 1 < n, egui::Button::new("▶"));

            ui.separator();
            ui.label(format!("x ≈ {racine}  ({arret})"));

            if prec.clicked() {
                self.precedente();
            }
            if suiv.clicked() {
                self.suivante();
            }
        });
        ui.monospace(detail);
    }

    fn ui_trace(&mut self, ui: &mut egui::Ui) {
        let params = Parametres::default();
        let courbe = match (&self.probleme, &self.resultat) {
            (Some(p), Some(r)) => match self.zoom {
                Some(fenetre) => echantillonner_sur(&p.expression, r, self.index, fenetre, &params),
                None => echantillonner(&p.expression, r, self.index, &params),
            },
            _ => return,
        };

        let taille = egui::vec2(ui.available_width(), HAUTEUR_TRACE);
        let (resp, painter) = ui.allocate_painter(taille, Sense::drag());
        let cadre = resp.rect;

        painter.rect_filled(cadre, 4.0, ui.visuals().extreme_bg_color);
        Self::peindre_courbe(&painter, cadre, &courbe, ui.visuals().text_color());

        // glisser horizontalement = zoom sur la plage balayée
        let vers_x = |px: f32| -> f64 {
            let t = ((px - cadre.left()) / cadre.width()).clamp(0.0, 1.0) as f64;
            courbe.x_min + t * (courbe.x_max - courbe.x_min)
        };
        if resp.drag_started() {
            self.debut_glisse = resp.interact_pointer_pos().map(|p| p.x);
        }
        let pointeur = resp.interact_pointer_pos().or_else(|| resp.hover_pos());
        if let (Some(x0), Some(pos)) = (self.debut_glisse, pointeur) {
            let zone = Rect::from_x_y_ranges(x0.min(pos.x)..=x0.max(pos.x), cadre.y_range());
            painter.rect_filled(zone, 0.0, COULEUR_A.gamma_multiply(0.15));
        }
        if resp.drag_stopped() {
            if let (Some(x0), Some(pos)) = (self.debut_glisse, pointeur) {
                self.zoomer(vers_x(x0), vers_x(pos.x));
            }
            self.debut_glisse = None;
        }

        ui.horizontal(|ui| {
            ui.colored_label(COULEUR_A, "● a");
            ui.colored_label(COULEUR_B, "● b");
            ui.colored_label(COULEUR_C, "● c");
            if courbe.finale {
                ui.colored_label(COULEUR_FINALE, "● racine approchée");
            }

            ui.separator();
            let retour = ui
                .add_enabled(self.zoom.is_some(), egui::Button::new("Réinitialiser la vue"))
                .on_hover_text("Glisser sur le tracé pour zoomer");
            if retour.clicked() {
                self.reinitialiser_vue();
            }
        });
    }

    fn peindre_courbe(painter: &egui::Painter, cadre: Rect, courbe: &Courbe, encre: Color32) {
        let ecran = |p: [f64; 2]| -> Pos2 {
            let tx = (p[0] - courbe.x_min) / (courbe.x_max - courbe.x_min);
            let ty = (p[1] - courbe.y_min) / (courbe.y_max - courbe.y_min);
            Pos2::new(
                cadre.left() + tx as f32 * cadre.width(),
                cadre.bottom() - ty as f32 * cadre.height(),
            )
        };

        // axe x (y = 0 est toujours dans la fenêtre)
        let gauche = ecran([courbe.x_min, 0.0]);
        let droite = ecran([courbe.x_max, 0.0]);
        painter.line_segment([gauche, droite], Stroke::new(1.0, encre.gamma_multiply(0.6)));
        for x in [courbe.x_min, courbe.x_max] {
            let pos = ecran([x, 0.0]);
            let ancre = if x == courbe.x_min {
                Align2::LEFT_TOP
            } else {
                Align2::RIGHT_TOP
            };
            painter.text(pos, ancre, format!("{x:.2}"), FontId::monospace(11.0), encre);
        }

        // courbe : un trait par portion continue (les points omis coupent le tracé)
        let pas = (courbe.x_max - courbe.x_min) / Parametres::default().nb_segments.max(1) as f64;
        let mut portion: Vec<Pos2> = Vec::new();
        let mut precedent: Option<f64> = None;
        for p in &courbe.points {
            if precedent.is_some_and(|x0| p[0] - x0 > 1.5 * pas) {
                Self::tracer_portion(painter, std::mem::take(&mut portion), encre);
            }
            portion.push(ecran(*p));
            precedent = Some(p[0]);
        }
        Self::tracer_portion(painter, portion, encre);

        // marqueurs : anciens estompés, sélection pleine
        let dernier = courbe.marqueurs_c.len().saturating_sub(1);
        for (serie, couleur) in [
            (&courbe.marqueurs_a, COULEUR_A),
            (&courbe.marqueurs_b, COULEUR_B),
            (&courbe.marqueurs_c, COULEUR_C),
        ] {
            for (i, m) in serie.iter().enumerate() {
                let (rayon, c) = if i == dernier {
                    (5.0, couleur)
                } else {
                    (3.0, couleur.gamma_multiply(0.35))
                };
                painter.circle_filled(ecran(*m), rayon, c);
            }
        }

        if courbe.finale {
            if let Some(m) = courbe.marqueurs_c.last() {
                painter.circle_stroke(ecran(*m), 8.0, Stroke::new(2.0, COULEUR_FINALE));
            }
        }
    }

    fn tracer_portion(painter: &egui::Painter, portion: Vec<Pos2>, encre: Color32) {
        if portion.len() > 1 {
            painter.add(Shape::line(portion, Stroke::new(1.5, encre)));
        }
    }

    fn ui_tableau(&mut self, ui: &mut egui::Ui) {
        let Some(r) = &self.resultat else {
            return;
        };
        let precision = Parametres::default().precision;
        let mut clic: Option<usize> = None;

        ui.label("Itérations :");
        egui::ScrollArea::both()
            .id_salt("tableau_iterations")
            .max_height(260.0)
            .show(ui, |ui| {
                egui::Grid::new("grille_iterations")
                    .striped(true)
                    .num_columns(ENTETES.len())
                    .spacing([14.0, 4.0])
                    .show(ui, |ui| {
                        for titre in ENTETES {
                            ui.strong(titre);
                        }
                        ui.end_row();

                        for (i, it) in r.iterations().iter().enumerate() {
                            let [rang, reste @ ..] = ligne_tabulaire(it, precision);
                            if ui.selectable_label(i == self.index, rang).clicked() {
                                clic = Some(i);
                            }
                            let (cellules, atteinte) = reste.split_at(reste.len() - 1);
                            for cellule in cellules {
                                ui.monospace(cellule);
                            }
                            if it.tolerance_atteinte {
                                ui.colored_label(COULEUR_C, format!("✔ {}", atteinte[0]));
                            } else {
                                ui.monospace(&atteinte[0]);
                            }
                            ui.end_row();
                        }
                    });
            });

        if let Some(i) = clic {
            self.selectionner(i);
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                if let Some(p) = &self.probleme {
                    Self::champ_monospace(ui, "demarche_jetons", "Jetons", p.expression.jetons());
                    Self::champ_monospace(ui, "demarche_rpn", "RPN", p.expression.rpn());
                }
                ui.add_space(4.0);
                Self::champ_monospace(ui, "demarche_resolution", "Résolution", &self.demarche.join("\n"));
            });
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, titre: &str, contenu: &str) {
        ui.label(format!("{titre} :"));
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }
}
