use crate::game::validation::{
    clamp_skill_level, validate_email, validate_required_text, validate_skill_level,
    DEFAULT_SKILL_LEVEL,
};
use crate::models::player::{CreatePlayerRequest, Player, UpdatePlayerRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Per-field messages shown under the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub nivel_habilidade: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.email.is_none() && self.nivel_habilidade.is_none()
    }
}

/// What the owning list sends once the form validates.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerSubmission {
    Create(CreatePlayerRequest),
    Update(i64, UpdatePlayerRequest),
}

/// Controlled-input state of the create/edit player form.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerForm {
    mode: FormMode,
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub posicao_preferida: String,
    skill_level: i32,
    /// Raw skill input that did not parse as a number
    skill_input_error: Option<String>,
    pub errors: FormErrors,
}

impl Default for PlayerForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Create,
            nome: String::new(),
            email: String::new(),
            telefone: String::new(),
            posicao_preferida: String::new(),
            skill_level: DEFAULT_SKILL_LEVEL,
            skill_input_error: None,
            errors: FormErrors::default(),
        }
    }

    /// Form pre-filled with a stored player, in edit mode.
    pub fn for_player(player: &Player) -> Self {
        Self {
            mode: FormMode::Edit(player.id),
            nome: player.name.clone(),
            email: player.email.clone(),
            telefone: player.phone.clone().unwrap_or_default(),
            posicao_preferida: player.preferred_position.clone().unwrap_or_default(),
            skill_level: clamp_skill_level(player.skill_level),
            skill_input_error: None,
            errors: FormErrors::default(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn skill_level(&self) -> i32 {
        self.skill_level
    }

    /// Numeric input is clamped to the allowed range.
    pub fn set_skill_level(&mut self, level: i32) {
        self.skill_level = clamp_skill_level(level);
        self.skill_input_error = None;
    }

    /// Raw text from the skill input. Non-numbers are kept as a validation error.
    pub fn set_skill_level_input(&mut self, input: &str) {
        match input.trim().parse::<i32>() {
            Ok(level) => self.set_skill_level(level),
            Err(_) => {
                self.skill_input_error = Some("Nível de habilidade deve ser um número".to_string());
            }
        }
    }

    /// Runs every field check and stores the messages. True when valid.
    pub fn validate(&mut self) -> bool {
        let mut errors = FormErrors {
            nome: validate_required_text("Nome", &self.nome, 100).err(),
            email: validate_email(&self.email).err(),
            nivel_habilidade: validate_skill_level(self.skill_level).err(),
        };
        if let Some(message) = &self.skill_input_error {
            errors.nivel_habilidade = Some(message.clone());
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// The request to send, or `None` (with `errors` filled) when invalid.
    pub fn submission(&mut self) -> Option<PlayerSubmission> {
        if !self.validate() {
            return None;
        }

        let telefone = non_blank(&self.telefone);
        let posicao = non_blank(&self.posicao_preferida);
        let submission = match self.mode {
            FormMode::Create => PlayerSubmission::Create(CreatePlayerRequest {
                name: self.nome.trim().to_string(),
                email: self.email.trim().to_string(),
                phone: telefone,
                preferred_position: posicao,
                skill_level: self.skill_level,
            }),
            FormMode::Edit(id) => PlayerSubmission::Update(
                id,
                UpdatePlayerRequest {
                    name: Some(self.nome.trim().to_string()),
                    email: Some(self.email.trim().to_string()),
                    phone: Some(telefone.unwrap_or_default()),
                    preferred_position: Some(posicao.unwrap_or_default()),
                    skill_level: Some(self.skill_level),
                    active: None,
                },
            ),
        };
        Some(submission)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn filled_form() -> PlayerForm {
        let mut form = PlayerForm::new();
        form.nome = "Romário".to_string();
        form.email = "romario@peladas.com".to_string();
        form
    }

    #[test]
    fn test_new_form_defaults() {
        let form = PlayerForm::new();
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.skill_level(), DEFAULT_SKILL_LEVEL);
        assert!(form.errors.is_empty());
    }

    #[test]
    fn test_skill_level_is_clamped() {
        let mut form = PlayerForm::new();
        form.set_skill_level(42);
        assert_eq!(form.skill_level(), 10);
        form.set_skill_level(-3);
        assert_eq!(form.skill_level(), 1);
        form.set_skill_level_input(" 7 ");
        assert_eq!(form.skill_level(), 7);
    }

    #[test]
    fn test_non_numeric_skill_input_fails_validation() {
        let mut form = filled_form();
        form.set_skill_level_input("muito bom");
        assert!(!form.validate());
        assert!(form.errors.nivel_habilidade.is_some());
        assert_eq!(form.skill_level(), DEFAULT_SKILL_LEVEL);

        form.set_skill_level(8);
        assert!(form.validate());
    }

    #[test]
    fn test_required_fields() {
        let mut form = PlayerForm::new();
        form.nome = "   ".to_string();
        form.email = "sem-arroba".to_string();
        assert!(form.submission().is_none());
        assert!(form.errors.nome.is_some());
        assert_eq!(form.errors.email.as_deref(), Some("Email inválido"));

        form.email = "zico@flamengo".to_string();
        assert!(!form.validate());
        assert!(form.errors.email.is_some());
    }

    #[test]
    fn test_create_submission_trims_and_drops_blank_optionals() {
        let mut form = filled_form();
        form.telefone = "  ".to_string();
        form.posicao_preferida = " Atacante ".to_string();
        match form.submission() {
            Some(PlayerSubmission::Create(request)) => {
                assert_eq!(request.name, "Romário");
                assert_eq!(request.phone, None);
                assert_eq!(request.preferred_position.as_deref(), Some("Atacante"));
                assert_eq!(request.skill_level, DEFAULT_SKILL_LEVEL);
            }
            other => panic!("unexpected submission: {:?}", other),
        }
    }

    #[test]
    fn test_edit_form_submits_update_for_same_id() {
        let player = Player {
            id: 9,
            name: "Bebeto".to_string(),
            email: "bebeto@peladas.com".to_string(),
            phone: Some("21 99999-0000".to_string()),
            preferred_position: None,
            skill_level: 9,
            active: true,
            registered_at: Utc::now(),
        };
        let mut form = PlayerForm::for_player(&player);
        assert_eq!(form.mode(), FormMode::Edit(9));
        assert_eq!(form.telefone, "21 99999-0000");

        form.set_skill_level(10);
        match form.submission() {
            Some(PlayerSubmission::Update(id, update)) => {
                assert_eq!(id, 9);
                assert_eq!(update.skill_level, Some(10));
                assert_eq!(update.preferred_position.as_deref(), Some(""));
                assert_eq!(update.active, None);
            }
            other => panic!("unexpected submission: {:?}", other),
        }
    }
}
