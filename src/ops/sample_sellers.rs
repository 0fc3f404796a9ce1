// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Built-in sample seller directory used for seeding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Profile, UserType};
use crate::time_utils::{format_utc_rfc3339, parse_utc_rfc3339};

struct SampleSeller {
    email: &'static str,
    name: &'static str,
    company: &'static str,
    phone: &'static str,
    description: &'static str,
    categories: [&'static str; 3],
    region: &'static str,
    premium: bool,
}

const SERVO_SET: [&str; 3] = ["서보모터", "실린더", "센서"];
const AUTOMATION_SET: [&str; 3] = ["PLC", "인버터", "AC/DC 모터"];
const PRECISION_SET: [&str; 3] = ["베어링", "LM 가이드", "센서"];
const MECHANICAL_SET: [&str; 3] = ["서보모터", "실린더", "기타"];

const SAMPLE_SELLERS: [SampleSeller; 20] = [
    SampleSeller {
        email: "contact@seoulparts.co.kr",
        name: "김철수",
        company: "서울부품공급(주)",
        phone: "02-1234-5678",
        description: "서울 지역 산업용 부품 전문 유통업체입니다. 서보모터, 실린더, 센서 등 다양한 부품을 취급하며 빠른 납기와 합리적인 가격을 제공합니다.",
        categories: SERVO_SET,
        region: "서울",
        premium: true,
    },
    SampleSeller {
        email: "info@gyeonggi-automation.com",
        name: "이영희",
        company: "경기자동화부품(주)",
        phone: "031-2345-6789",
        description: "경기 지역 자동화 부품 전문 유통사입니다. PLC, 인버터, 모터 등 자동화 시스템에 필요한 모든 부품을 공급합니다.",
        categories: AUTOMATION_SET,
        region: "경기",
        premium: true,
    },
    SampleSeller {
        email: "sales@incheon-industrial.com",
        name: "박민수",
        company: "인천산업부품(주)",
        phone: "032-3456-7890",
        description: "인천 지역 산업용 부품 전문 유통업체입니다. 베어링, LM가이드, 기타 부품을 취급하며 전국 배송이 가능합니다.",
        categories: ["베어링", "LM 가이드", "기타"],
        region: "인천",
        premium: false,
    },
    SampleSeller {
        email: "contact@busan-machinery.co.kr",
        name: "최지영",
        company: "부산기계부품(주)",
        phone: "051-4567-8901",
        description: "부산 지역 기계 부품 전문 유통사입니다. 서보모터, 실린더, 센서 등 다양한 부품을 취급합니다.",
        categories: SERVO_SET,
        region: "부산",
        premium: false,
    },
    SampleSeller {
        email: "info@daegu-parts.com",
        name: "정대현",
        company: "대구부품공급(주)",
        phone: "053-5678-9012",
        description: "대구 지역 산업용 부품 전문 유통업체입니다. PLC, 인버터, 모터 등 자동화 부품을 전문으로 취급합니다.",
        categories: AUTOMATION_SET,
        region: "대구",
        premium: false,
    },
    SampleSeller {
        email: "sales@daejeon-automation.co.kr",
        name: "강수진",
        company: "대전자동화부품(주)",
        phone: "042-6789-0123",
        description: "대전 지역 자동화 부품 전문 유통사입니다. 베어링, LM가이드, 센서 등 정밀 부품을 취급합니다.",
        categories: PRECISION_SET,
        region: "대전",
        premium: false,
    },
    SampleSeller {
        email: "contact@gwangju-industrial.com",
        name: "윤태호",
        company: "광주산업부품(주)",
        phone: "062-7890-1234",
        description: "광주 지역 산업용 부품 전문 유통업체입니다. 서보모터, 실린더, 기타 부품을 취급하며 빠른 납기를 자랑합니다.",
        categories: MECHANICAL_SET,
        region: "광주",
        premium: false,
    },
    SampleSeller {
        email: "info@ulsan-parts.co.kr",
        name: "임동욱",
        company: "울산부품공급(주)",
        phone: "052-8901-2345",
        description: "울산 지역 부품 전문 유통사입니다. PLC, 인버터, 모터 등 자동화 시스템 부품을 전문으로 취급합니다.",
        categories: AUTOMATION_SET,
        region: "울산",
        premium: false,
    },
    SampleSeller {
        email: "sales@sejong-automation.com",
        name: "한미라",
        company: "세종자동화부품(주)",
        phone: "044-9012-3456",
        description: "세종 지역 자동화 부품 전문 유통업체입니다. 베어링, LM가이드, 센서 등 정밀 부품을 취급합니다.",
        categories: PRECISION_SET,
        region: "세종",
        premium: false,
    },
    SampleSeller {
        email: "contact@gangwon-industrial.co.kr",
        name: "송재현",
        company: "강원산업부품(주)",
        phone: "033-0123-4567",
        description: "강원 지역 산업용 부품 전문 유통사입니다. 서보모터, 실린더, 기타 부품을 취급하며 전국 배송이 가능합니다.",
        categories: MECHANICAL_SET,
        region: "강원",
        premium: false,
    },
    SampleSeller {
        email: "info@chungbuk-parts.com",
        name: "오세영",
        company: "충북부품공급(주)",
        phone: "043-1234-5678",
        description: "충북 지역 부품 전문 유통업체입니다. PLC, 인버터, 모터 등 자동화 부품을 전문으로 취급합니다.",
        categories: AUTOMATION_SET,
        region: "충북",
        premium: false,
    },
    SampleSeller {
        email: "sales@chungnam-automation.co.kr",
        name: "류지혜",
        company: "충남자동화부품(주)",
        phone: "041-2345-6789",
        description: "충남 지역 자동화 부품 전문 유통사입니다. 베어링, LM가이드, 센서 등 정밀 부품을 취급합니다.",
        categories: PRECISION_SET,
        region: "충남",
        premium: false,
    },
    SampleSeller {
        email: "contact@jeonbuk-industrial.com",
        name: "배성민",
        company: "전북산업부품(주)",
        phone: "063-3456-7890",
        description: "전북 지역 산업용 부품 전문 유통업체입니다. 서보모터, 실린더, 기타 부품을 취급하며 빠른 납기를 제공합니다.",
        categories: MECHANICAL_SET,
        region: "전북",
        premium: false,
    },
    SampleSeller {
        email: "info@jeonnam-parts.co.kr",
        name: "신동욱",
        company: "전남부품공급(주)",
        phone: "061-4567-8901",
        description: "전남 지역 부품 전문 유통사입니다. PLC, 인버터, 모터 등 자동화 시스템 부품을 전문으로 취급합니다.",
        categories: AUTOMATION_SET,
        region: "전남",
        premium: false,
    },
    SampleSeller {
        email: "sales@gyeongbuk-automation.com",
        name: "조은지",
        company: "경북자동화부품(주)",
        phone: "054-5678-9012",
        description: "경북 지역 자동화 부품 전문 유통업체입니다. 베어링, LM가이드, 센서 등 정밀 부품을 취급합니다.",
        categories: PRECISION_SET,
        region: "경북",
        premium: false,
    },
    SampleSeller {
        email: "contact@gyeongnam-industrial.co.kr",
        name: "허준호",
        company: "경남산업부품(주)",
        phone: "055-6789-0123",
        description: "경남 지역 산업용 부품 전문 유통사입니다. 서보모터, 실린더, 기타 부품을 취급하며 전국 배송이 가능합니다.",
        categories: MECHANICAL_SET,
        region: "경남",
        premium: false,
    },
    SampleSeller {
        email: "info@jeju-parts.com",
        name: "고민수",
        company: "제주부품공급(주)",
        phone: "064-7890-1234",
        description: "제주 지역 부품 전문 유통업체입니다. PLC, 인버터, 모터 등 자동화 부품을 전문으로 취급합니다.",
        categories: AUTOMATION_SET,
        region: "제주",
        premium: false,
    },
    SampleSeller {
        email: "sales@national-automation.co.kr",
        name: "문혜진",
        company: "전국자동화부품(주)",
        phone: "02-8901-2345",
        description: "전국 배송이 가능한 자동화 부품 전문 유통사입니다. 베어링, LM가이드, 센서 등 모든 자동화 부품을 취급합니다.",
        categories: PRECISION_SET,
        region: "서울",
        premium: true,
    },
    SampleSeller {
        email: "contact@premium-parts.com",
        name: "양성호",
        company: "프리미엄부품공급(주)",
        phone: "02-9012-3456",
        description: "프리미엄 품질의 산업용 부품을 전문으로 취급하는 유통업체입니다. 서보모터, 실린더, 센서 등 고품질 부품을 제공합니다.",
        categories: SERVO_SET,
        region: "서울",
        premium: true,
    },
    SampleSeller {
        email: "info@tech-automation.co.kr",
        name: "구미영",
        company: "테크자동화부품(주)",
        phone: "031-0123-4567",
        description: "최신 기술의 자동화 부품을 전문으로 취급하는 유통사입니다. PLC, 인버터, 모터 등 첨단 자동화 시스템 부품을 제공합니다.",
        categories: AUTOMATION_SET,
        region: "경기",
        premium: true,
    },
];

/// Document id derived from an e-mail address.
pub fn doc_id_for_email(email: &str) -> String {
    email.replace(['@', '.'], "_")
}

/// Portable seller record, as written by `export-sellers` and read by
/// `seed-sellers --file`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerRecord {
    pub email: String,
    pub name: String,
    pub company: String,
    #[serde(default = "seller_type")]
    pub user_type: UserType,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default = "complete")]
    pub profile_complete: bool,
    /// RFC3339; seeding time when absent
    #[serde(default)]
    pub created_at: Option<String>,
}

fn seller_type() -> UserType {
    UserType::Seller
}

fn complete() -> bool {
    true
}

impl SellerRecord {
    pub fn into_profile(self, id: String, now: DateTime<Utc>) -> anyhow::Result<Profile> {
        let created_at = match self.created_at.as_deref() {
            Some(raw) => parse_utc_rfc3339(raw)
                .map_err(|e| anyhow::anyhow!("invalid createdAt for {id}: {e}"))?,
            None => now,
        };

        let mut profile = Profile::new(
            id,
            self.email,
            self.name,
            self.company,
            self.user_type,
            created_at,
        );
        profile.phone = self.phone;
        profile.description = self.description;
        profile.categories = self.categories;
        profile.region = self.region;
        profile.is_premium = self.is_premium;
        profile.profile_complete = self.profile_complete;
        Ok(profile)
    }
}

/// The built-in sellers keyed by document id.
pub fn sample_records(now: DateTime<Utc>) -> BTreeMap<String, SellerRecord> {
    SAMPLE_SELLERS
        .iter()
        .map(|s| {
            let record = SellerRecord {
                email: s.email.to_string(),
                name: s.name.to_string(),
                company: s.company.to_string(),
                user_type: UserType::Seller,
                phone: Some(s.phone.to_string()),
                description: Some(s.description.to_string()),
                categories: s.categories.iter().map(|c| c.to_string()).collect(),
                region: Some(s.region.to_string()),
                is_premium: s.premium,
                profile_complete: true,
                created_at: Some(format_utc_rfc3339(now)),
            };
            (doc_id_for_email(s.email), record)
        })
        .collect()
}
