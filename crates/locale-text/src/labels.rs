//! Static label tables for the invoice form and document

use crate::Language;
use serde::Serialize;

macro_rules! define_labels {
    ($($key:ident),* $(,)?) => {
        /// Every display string used by the invoice form and the generated document
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        pub struct Labels {
            $(pub $key: &'static str,)*
        }

        impl Labels {
            /// Look up a label by key name (e.g. `"pdf_header"`)
            pub fn get(&self, key: &str) -> Option<&'static str> {
                match key {
                    $(stringify!($key) => Some(self.$key),)*
                    _ => None,
                }
            }

            /// All (key, value) pairs in table order
            pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
                vec![$((stringify!($key), self.$key),)*]
            }
        }
    };
}

define_labels!(
    page_title,
    title,
    subtitle,
    lang,
    currency,
    invoice_info,
    invoice_no,
    issue_date,
    due_date,
    from_title,
    to_title,
    company,
    business_no,
    address,
    email,
    phone,
    items_title,
    item_name,
    qty,
    unit_price,
    amount,
    add_item,
    remove_item,
    subtotal,
    tax_rate,
    tax,
    total,
    payment_title,
    bank_name,
    account_no,
    account_holder,
    notes_title,
    notes_placeholder,
    generate,
    download,
    preview,
    pdf_header,
    pdf_footer,
    fill_warning,
);

static KO: Labels = Labels {
    page_title: "인보이스 생성기",
    title: "청구서 생성기",
    subtitle: "정보를 입력하고 PDF 인보이스를 생성하세요.",
    lang: "언어",
    currency: "통화",
    invoice_info: "인보이스 정보",
    invoice_no: "인보이스 번호",
    issue_date: "발행일",
    due_date: "결제기한",
    from_title: "발신자 정보 (From)",
    to_title: "수신자 정보 (To)",
    company: "회사명 / 이름",
    business_no: "사업자등록번호",
    address: "주소",
    email: "이메일",
    phone: "전화번호",
    items_title: "품목",
    item_name: "품목명",
    qty: "수량",
    unit_price: "단가",
    amount: "금액",
    add_item: "품목 추가",
    remove_item: "삭제",
    subtotal: "소계",
    tax_rate: "세율 (%)",
    tax: "세금",
    total: "합계",
    payment_title: "결제 정보",
    bank_name: "은행명",
    account_no: "계좌번호",
    account_holder: "예금주",
    notes_title: "비고 / 메모",
    notes_placeholder: "추가 메모를 입력하세요.",
    generate: "PDF 생성",
    download: "PDF 다운로드",
    preview: "미리보기",
    pdf_header: "청구서",
    pdf_footer: "감사합니다.",
    fill_warning: "발신자, 수신자 회사명과 최소 1개 품목을 입력하세요.",
};

static EN: Labels = Labels {
    page_title: "Invoice Generator",
    title: "Invoice Generator",
    subtitle: "Fill in the details and generate a PDF invoice.",
    lang: "Language",
    currency: "Currency",
    invoice_info: "Invoice Information",
    invoice_no: "Invoice No.",
    issue_date: "Issue Date",
    due_date: "Due Date",
    from_title: "From",
    to_title: "To",
    company: "Company / Name",
    business_no: "Business Reg. No.",
    address: "Address",
    email: "Email",
    phone: "Phone",
    items_title: "Items",
    item_name: "Item",
    qty: "Qty",
    unit_price: "Unit Price",
    amount: "Amount",
    add_item: "Add Item",
    remove_item: "Remove",
    subtotal: "Subtotal",
    tax_rate: "Tax Rate (%)",
    tax: "Tax",
    total: "Total",
    payment_title: "Payment Information",
    bank_name: "Bank Name",
    account_no: "Account No.",
    account_holder: "Account Holder",
    notes_title: "Notes / Memo",
    notes_placeholder: "Enter additional notes.",
    generate: "Generate PDF",
    download: "Download PDF",
    preview: "Preview",
    pdf_header: "INVOICE",
    pdf_footer: "Thank you for your business!",
    fill_warning: "Please fill in From/To company names and at least one item.",
};

/// The label table for a language
pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::Ko => &KO,
        Language::En => &EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_labels() {
        assert_eq!(labels(Language::Ko).pdf_header, "청구서");
        assert_eq!(labels(Language::En).pdf_header, "INVOICE");
        assert_eq!(labels(Language::Ko).pdf_footer, "감사합니다.");
        assert_eq!(labels(Language::En).pdf_footer, "Thank you for your business!");
    }

    #[test]
    fn test_get_by_key() {
        let en = labels(Language::En);
        assert_eq!(en.get("subtotal"), Some("Subtotal"));
        assert_eq!(en.get("business_no"), Some("Business Reg. No."));
        assert_eq!(en.get("no_such_key"), None);
    }

    #[test]
    fn test_tables_are_complete() {
        let ko = labels(Language::Ko).entries();
        let en = labels(Language::En).entries();
        assert_eq!(ko.len(), 39);

        let ko_keys: Vec<&str> = ko.iter().map(|(k, _)| *k).collect();
        let en_keys: Vec<&str> = en.iter().map(|(k, _)| *k).collect();
        assert_eq!(ko_keys, en_keys);

        for (key, value) in ko.iter().chain(en.iter()) {
            assert!(!value.trim().is_empty(), "empty label for {key}");
        }
    }

    #[test]
    fn test_entries_match_get() {
        let ko = labels(Language::Ko);
        for (key, value) in ko.entries() {
            assert_eq!(ko.get(key), Some(value));
        }
    }

    #[test]
    fn test_serialize_as_object() {
        let json = serde_json::to_value(labels(Language::En)).unwrap();
        assert_eq!(json["pdf_header"], "INVOICE");
        assert_eq!(json["tax"], "Tax");
    }
}
