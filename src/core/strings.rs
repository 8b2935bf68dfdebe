//! # Localized Strings
//!
//! Every piece of user-visible text, per locale. The app ships Korean first
//! with an English table alongside.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ko" | "ko_kr" | "ko-kr" => Ok(Locale::Ko),
            "en" | "en_us" | "en-us" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{}'", other)),
        }
    }
}

/// Static text table for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    /// List screen title
    pub list_title: &'static str,
    /// Add sheet title
    pub sheet_title: &'static str,
    pub cancel: &'static str,
    pub save: &'static str,
    /// Label shown in the add sheet body
    pub time_label: &'static str,
    /// Empty list placeholder
    pub empty_list: &'static str,
    pub notification_title: &'static str,
    pub notification_body: &'static str,
    pub am: &'static str,
    pub pm: &'static str,
    /// Status bar: daily alert scheduled
    pub alerts_on: &'static str,
    /// Status bar: permission denied
    pub alerts_off: &'static str,
    /// Status bar: permission request still running
    pub alerts_pending: &'static str,
    pub list_hints: &'static str,
    pub sheet_hints: &'static str,
    pub error_prefix: &'static str,
    /// Confirmation after a save
    pub saved: &'static str,
    /// Confirmation after a delete
    pub deleted: &'static str,
}

const KO: Strings = Strings {
    list_title: "물마시기",
    sheet_title: "알림 추가",
    cancel: "취소",
    save: "저장",
    time_label: "시간",
    empty_list: "기록이 없습니다. [a]를 눌러 추가하세요.",
    notification_title: "물 마시자",
    notification_body: "물 마실 시간입니다.",
    am: "오전",
    pm: "오후",
    alerts_on: "알림 19:07",
    alerts_off: "알림 꺼짐",
    alerts_pending: "알림 확인 중",
    list_hints: "a:추가 t:체크 d:삭제 q:종료",
    sheet_hints: "Enter:저장 Esc:취소",
    error_prefix: "오류",
    saved: "저장했습니다",
    deleted: "삭제했습니다",
};

const EN: Strings = Strings {
    list_title: "Drink Water",
    sheet_title: "Add Notification",
    cancel: "Cancel",
    save: "Save",
    time_label: "Time",
    empty_list: "Nothing recorded yet. Press [a] to add one.",
    notification_title: "Time to drink water",
    notification_body: "It's time to drink some water.",
    am: "AM",
    pm: "PM",
    alerts_on: "Alerts 19:07",
    alerts_off: "Alerts off",
    alerts_pending: "Alerts ...",
    list_hints: "a:Add t:Toggle d:Delete q:Quit",
    sheet_hints: "Enter:Save Esc:Cancel",
    error_prefix: "Error",
    saved: "Saved",
    deleted: "Deleted",
};

impl Strings {
    pub fn for_locale(locale: Locale) -> &'static Strings {
        match locale {
            Locale::Ko => &KO,
            Locale::En => &EN,
        }
    }
}
