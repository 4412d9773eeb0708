//! Common regex patterns for Japanese business document extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Company names next to a legal-entity marker
    pub static ref COMPANY_JP_PREFIXED: Regex = Regex::new(
        r"(?:株式会社|有限会社|合同会社)[ \t　]*([^\s。、,，「」()（）]{1,20})"
    ).unwrap();

    pub static ref COMPANY_JP_SUFFIXED: Regex = Regex::new(
        r"([^\s。、,，「」()（）]{1,20})[ \t　]*(?:株式会社|有限会社|合同会社)"
    ).unwrap();

    pub static ref COMPANY_LATIN_SUFFIXED: Regex = Regex::new(
        r"([A-Z][A-Za-z0-9&\-]*(?:\s+[A-Z][A-Za-z0-9&\-]*){0,4}),?\s+(?:Inc|Ltd|LLC|Corp|Corporation)\b\.?"
    ).unwrap();

    // Labelled issuer / recipient lines
    pub static ref ISSUER_LABEL: Regex = Regex::new(
        r"請求書?\s*発行者?\s*[：:]\s*([^\n\r]{1,30})"
    ).unwrap();

    pub static ref ISSUER_SHORT_LABEL: Regex = Regex::new(
        r"発行者?\s*[：:]\s*([^\n\r]{1,30})"
    ).unwrap();

    pub static ref PARTY_LABEL: Regex = Regex::new(
        r"(?i)(?:\b(?:issuer|from|to)\b|宛先)\s*[：:]\s*([^\n\r]{1,30})"
    ).unwrap();

    // Words stripped from a labelled company-name match
    pub static ref COMPANY_NOISE: Regex = Regex::new(
        r"(?i)株式会社|有限会社|合同会社|\b(?:Corporation|Corp|Inc|Ltd|LLC)\b\.?|請求書|発行者|宛先|御中"
    ).unwrap();

    // File name clean-up
    pub static ref FILE_EXTENSION: Regex = Regex::new(
        r"\.[^/.]+$"
    ).unwrap();

    pub static ref FILE_NAME_NOISE: Regex = Regex::new(
        r"(?i)請求書|invoice|見積書?|estimate|quote|契約書?|contract"
    ).unwrap();

    pub static ref FILE_NAME_DATE: Regex = Regex::new(
        r"\d{4}[/\-_.]?\d{1,2}[/\-_.]?\d{1,2}|\d{1,2}[/\-_.]?\d{1,2}[/\-_.]?\d{4}"
    ).unwrap();

    pub static ref FILE_NAME_SEPARATORS: Regex = Regex::new(
        r"[_\-\s]+"
    ).unwrap();

    // Yen amounts, most specific first
    pub static ref AMOUNT_LABELLED: Regex = Regex::new(
        r"(?:合計|総額|請求額|請求金額|金額)[^0-9\n]{0,12}?([0-9][0-9,]*)\s*(万)?\s*円?"
    ).unwrap();

    pub static ref AMOUNT_YEN_PREFIXED: Regex = Regex::new(
        r"[¥￥]\s*([0-9][0-9,]*)\s*(万)?"
    ).unwrap();

    pub static ref AMOUNT_MAN_SUFFIXED: Regex = Regex::new(
        r"([0-9][0-9,]*(?:\.[0-9]+)?)\s*(万)円"
    ).unwrap();

    pub static ref AMOUNT_YEN_SUFFIXED: Regex = Regex::new(
        r"([0-9][0-9,]{5,})\s*円"
    ).unwrap();

    // Dates
    pub static ref DATE_YMD: Regex = Regex::new(
        r"\d{4}[年/\-.]\d{1,2}[月/\-.]\d{1,2}日?"
    ).unwrap();

    pub static ref DATE_MDY: Regex = Regex::new(
        r"\d{1,2}[月/\-]\d{1,2}[日/\-]\d{4}"
    ).unwrap();

    pub static ref DATE_ERA: Regex = Regex::new(
        r"(?:令和|平成)(?:\d{1,2}|元)年\d{1,2}月\d{1,2}日"
    ).unwrap();

    // Contact details
    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    pub static ref PHONE: Regex = Regex::new(
        r"(?:\+81[\-\s]?|0)\d{1,4}[\-\s]?\d{1,4}[\-\s]?\d{4}"
    ).unwrap();

    pub static ref URL: Regex = Regex::new(
        r"https?://[^\s、。「」]+"
    ).unwrap();
}
