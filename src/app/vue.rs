// src/app/vue.rs
//
// Rendu egui : bandeau (historique, thème, retour arrière), zone
// d'affichage, clavier 4 colonnes, panneau d'historique. Toute touche
// passe par `appliquer`, le clavier physique est rabattu sur les mêmes
// commandes.

use eframe::egui;

use crate::noyau::format::format_nombre_affichage;
use crate::noyau::jetons::Op;

use super::etat::AppCalc;

/// Une touche logique de la calculatrice, quel que soit son point
/// d'entrée (bouton ou clavier physique).
#[derive(Clone, Copy, Debug)]
pub(crate) enum Touche {
    Chiffre(char),
    Decimale,
    Operateur(Op),
    Signe,
    Pourcentage,
    BasculeParentheses,
    OuvrirParenthese,
    FermerParenthese,
    RetourArriere,
    Effacer,
    Egal,
}

impl AppCalc {
    pub(crate) fn appliquer(&mut self, touche: Touche) {
        match touche {
            Touche::Chiffre(c) => self.editeur.chiffre(c),
            Touche::Decimale => self.editeur.decimale(),
            Touche::Operateur(op) => self.editeur.operateur(op),
            Touche::Signe => self.editeur.signe(),
            Touche::Pourcentage => self.editeur.pourcentage(),
            Touche::BasculeParentheses => self.editeur.bascule_parentheses(),
            Touche::OuvrirParenthese => self.editeur.ouvrir_parenthese(),
            Touche::FermerParenthese => self.editeur.fermer_parenthese(),
            Touche::RetourArriere => self.editeur.retour_arriere(),
            Touche::Effacer => self.editeur.effacer(),
            Touche::Egal => self.egal(),
        }
    }

    /* ---- clavier physique ---- */

    pub(crate) fn clavier(&mut self, ctx: &egui::Context) {
        let evenements = ctx.input(|i| i.events.clone());
        for evenement in evenements {
            match evenement {
                egui::Event::Text(texte) => {
                    for c in texte.chars() {
                        if let Some(touche) = touche_du_caractere(c) {
                            self.appliquer(touche);
                        }
                    }
                }
                egui::Event::Key {
                    key: egui::Key::Enter,
                    pressed: true,
                    ..
                } => self.appliquer(Touche::Egal),
                egui::Event::Key {
                    key: egui::Key::Backspace,
                    pressed: true,
                    ..
                } => self.appliquer(Touche::RetourArriere),
                egui::Event::Key {
                    key: egui::Key::Escape,
                    pressed: true,
                    ..
                } => self.appliquer(Touche::Effacer),
                _ => {}
            }
        }
    }

    /* ---- panneau principal ---- */

    pub(crate) fn ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .button("🕘")
                .on_hover_text("Historique")
                .clicked()
            {
                self.basculer_panneau();
            }
            let theme = if self.sombre { "☀" } else { "🌙" };
            if ui.button(theme).on_hover_text("Thème").clicked() {
                self.basculer_theme();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⌫").clicked() {
                    self.appliquer(Touche::RetourArriere);
                }
            });
        });

        ui.add_space(4.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_height(64.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(self.editeur.affichage())
                        .monospace()
                        .size(30.0),
                );
            });
        });

        ui.add_space(8.0);
        self.clavier_virtuel(ui);
    }

    fn clavier_virtuel(&mut self, ui: &mut egui::Ui) {
        let rangees: [[(&str, Touche); 4]; 5] = [
            [
                ("AC", Touche::Effacer),
                ("( )", Touche::BasculeParentheses),
                ("%", Touche::Pourcentage),
                ("÷", Touche::Operateur(Op::Division)),
            ],
            [
                ("7", Touche::Chiffre('7')),
                ("8", Touche::Chiffre('8')),
                ("9", Touche::Chiffre('9')),
                ("×", Touche::Operateur(Op::Fois)),
            ],
            [
                ("4", Touche::Chiffre('4')),
                ("5", Touche::Chiffre('5')),
                ("6", Touche::Chiffre('6')),
                ("−", Touche::Operateur(Op::Moins)),
            ],
            [
                ("1", Touche::Chiffre('1')),
                ("2", Touche::Chiffre('2')),
                ("3", Touche::Chiffre('3')),
                ("+", Touche::Operateur(Op::Plus)),
            ],
            [
                ("±", Touche::Signe),
                ("0", Touche::Chiffre('0')),
                (".", Touche::Decimale),
                ("=", Touche::Egal),
            ],
        ];

        let largeur = (ui.available_width() - 3.0 * 6.0) / 4.0;
        let taille = egui::vec2(largeur, 52.0);

        egui::Grid::new("clavier")
            .spacing(egui::vec2(6.0, 6.0))
            .show(ui, |ui| {
                for rangee in rangees {
                    for (texte, touche) in rangee {
                        if bouton(ui, texte, taille).clicked() {
                            self.appliquer(touche);
                        }
                    }
                    ui.end_row();
                }
            });
    }

    /* ---- panneau d'historique ---- */

    pub(crate) fn ui_historique(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Historique");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if !self.historique.est_vide() && ui.button("Vider").clicked() {
                    self.historique.vider();
                }
            });
        });
        ui.separator();

        if self.historique.est_vide() {
            ui.weak("Aucun calcul pour l'instant.");
            return;
        }

        // les clics sont collectés pendant le parcours et appliqués après,
        // l'historique ne peut pas être muté sous son propre itérateur
        let mut rappel = None;
        let mut suppression = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (indice, entree) in self.historique.entrees().iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.weak(&entree.expression);
                        let resultat = format_nombre_affichage(&entree.resultat);
                        if ui
                            .link(egui::RichText::new(resultat).size(18.0))
                            .on_hover_text("Reprendre ce résultat")
                            .clicked()
                        {
                            rappel = Some(indice);
                        }
                    });
                    ui.with_layout(
                        egui::Layout::right_to_left(egui::Align::Center),
                        |ui| {
                            if ui.small_button("✕").clicked() {
                                suppression = Some(indice);
                            }
                        },
                    );
                });
                ui.separator();
            }
        });

        if let Some(indice) = suppression {
            self.historique.supprimer(indice);
        }
        if let Some(indice) = rappel {
            self.rappeler(indice);
            self.panneau_historique = false;
        }
    }
}

fn bouton(ui: &mut egui::Ui, texte: &str, taille: egui::Vec2) -> egui::Response {
    ui.add_sized(
        taille,
        egui::Button::new(egui::RichText::new(texte).size(20.0)),
    )
}

fn touche_du_caractere(c: char) -> Option<Touche> {
    match c {
        '0'..='9' => Some(Touche::Chiffre(c)),
        '.' | ',' => Some(Touche::Decimale),
        '+' => Some(Touche::Operateur(Op::Plus)),
        '-' => Some(Touche::Operateur(Op::Moins)),
        '*' => Some(Touche::Operateur(Op::Fois)),
        '/' => Some(Touche::Operateur(Op::Division)),
        '%' => Some(Touche::Pourcentage),
        '(' => Some(Touche::OuvrirParenthese),
        ')' => Some(Touche::FermerParenthese),
        '=' => Some(Touche::Egal),
        'c' | 'C' => Some(Touche::Effacer),
        _ => None,
    }
}
