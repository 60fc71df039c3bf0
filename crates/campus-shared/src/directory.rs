//! Static academic directory: universities → colleges → specializations.
//!
//! The directory defines which affiliations a user may pick at registration
//! and which names a professor may give to a new channel.  It is never
//! mutated at runtime.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct College {
    pub id: &'static str,
    pub name: &'static str,
    pub specializations: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct University {
    pub id: &'static str,
    pub name: &'static str,
    pub colleges: &'static [College],
}

impl University {
    pub fn college(&self, name: &str) -> Option<&'static College> {
        self.colleges.iter().find(|c| c.name == name)
    }
}

static UNIVERSITIES: &[University] = &[
    University {
        id: "uni1",
        name: "جامعة الجزائر 1 بن يوسف بن خدة",
        colleges: &[
            College { id: "coll1_1", name: "كلية العلوم", specializations: &["الرياضيات", "الفيزياء", "الكيمياء", "الإعلام الآلي"] },
            College { id: "coll1_2", name: "كلية الحقوق", specializations: &["القانون العام", "القانون الخاص", "علوم سياسية"] },
            College { id: "coll1_3", name: "كلية الطب", specializations: &["الطب البشري", "طب الأسنان", "الصيدلة"] },
        ],
    },
    University {
        id: "uni2",
        name: "جامعة وهران 1 أحمد بن بلة",
        colleges: &[
            College { id: "coll2_1", name: "كلية العلوم الدقيقة والتطبيقية", specializations: &["الفيزياء التطبيقية", "الكيمياء الصناعية", "الجيولوجيا"] },
            College { id: "coll2_2", name: "كلية الآداب والفنون", specializations: &["اللغة العربية وآدابها", "اللغة الإنجليزية", "تاريخ وفنون"] },
            College { id: "coll2_3", name: "كلية العلوم الاقتصادية والتجارية وعلوم التسيير", specializations: &["علوم مالية ومحاسبة", "إدارة الأعمال", "تسويق"] },
            College { id: "coll2_4", name: "كلية الطب", specializations: &["الطب البشري", "طب الأسنان", "الصيدلة"] },
        ],
    },
    University {
        id: "uni3",
        name: "جامعة العلوم والتكنولوجيا هواري بومدين (USTHB)",
        colleges: &[
            College { id: "coll3_1", name: "كلية الرياضيات", specializations: &["رياضيات", "إحصاء", "بحث عملي"] },
            College { id: "coll3_2", name: "كلية الإعلام الآلي", specializations: &["هندسة برمجيات", "ذكاء اصطناعي", "شبكات واتصالات"] },
            College { id: "coll3_3", name: "كلية الهندسة المدنية", specializations: &["هندسة مدنية", "هندسة مائية", "هندسة معمارية"] },
            College { id: "coll3_4", name: "كلية الإلكترونيك و الكهروميكانيك", specializations: &["إلكترونيك", "كهرباء", "ميكانيك"] },
        ],
    },
    University {
        id: "uni4",
        name: "جامعة قسنطينة 1 الإخوة منتوري",
        colleges: &[
            College { id: "coll4_1", name: "كلية الطب", specializations: &["الطب البشري", "طب الأسنان", "الصيدلة"] },
            College { id: "coll4_2", name: "كلية العلوم والتكنولوجيا", specializations: &["هندسة كهربائية", "هندسة ميكانيكية", "هندسة كيميائية"] },
            College { id: "coll4_3", name: "كلية الحقوق والعلوم السياسية", specializations: &["القانون الخاص", "القانون العام", "علوم سياسية"] },
        ],
    },
    University {
        id: "uni5",
        name: "جامعة باجي مختار عنابة",
        colleges: &[
            College { id: "coll5_1", name: "كلية التكنولوجيا", specializations: &["هندسة صناعية", "هندسة الطرائق", "هندسة كهربائية"] },
            College { id: "coll5_2", name: "كلية العلوم الاقتصادية والتجارية وعلوم التسيير", specializations: &["اقتصاد كمي", "إدارة أعمال دولية", "مالية وبنوك"] },
            College { id: "coll5_3", name: "كلية الطب", specializations: &["طب", "صيدلة", "جراحة أسنان"] },
        ],
    },
    University {
        id: "uni6",
        name: "جامعة ابن خلدون تيارت",
        colleges: &[
            College { id: "coll6_1", name: "كلية العلوم الإنسانية والاجتماعية", specializations: &["علم النفس", "علم الاجتماع", "تاريخ"] },
            College { id: "coll6_2", name: "كلية العلوم الدقيقة والإعلام الآلي", specializations: &["رياضيات وإعلام آلي", "فيزياء", "كيمياء"] },
            College { id: "coll6_3", name: "كلية الآداب واللغات والفنون", specializations: &["لغة عربية", "لغة فرنسية", "لغة إنجليزية"] },
        ],
    },
    University {
        id: "uni7",
        name: "جامعة ابن خلدون ملحقة قصر الشلالة",
        colleges: &[
            College { id: "coll7_1", name: "كلية العلوم", specializations: &["الرياضيات التطبيقية", "فيزياء المواد", "علوم الحياة"] },
            College { id: "coll7_2", name: "كلية العلوم الاقتصادية و علوم التسيير", specializations: &["محاسبة ومالية", "إدارة أعمال", "اقتصاد دولي", "تسويق"] },
        ],
    },
];

/// All universities, in display order.
pub fn universities() -> &'static [University] {
    UNIVERSITIES
}

pub fn find_university(name: &str) -> Option<&'static University> {
    UNIVERSITIES.iter().find(|u| u.name == name)
}

pub fn find_university_by_id(id: &str) -> Option<&'static University> {
    UNIVERSITIES.iter().find(|u| u.id == id)
}

/// Colleges of a university, empty when the university is unknown.
pub fn colleges_of(university: &str) -> &'static [College] {
    find_university(university).map(|u| u.colleges).unwrap_or(&[])
}

/// Specializations offered by a college, empty when the pair is unknown.
pub fn specializations_of(university: &str, college: &str) -> &'static [&'static str] {
    find_university(university)
        .and_then(|u| u.college(college))
        .map(|c| c.specializations)
        .unwrap_or(&[])
}

pub fn is_valid_affiliation(university: &str, college: &str) -> bool {
    find_university(university)
        .and_then(|u| u.college(college))
        .is_some()
}

/// A channel name must be one of the specializations of its college.
pub fn is_valid_channel_name(university: &str, college: &str, name: &str) -> bool {
    specializations_of(university, college).contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALGIERS: &str = "جامعة الجزائر 1 بن يوسف بن خدة";
    const SCIENCES: &str = "كلية العلوم";

    #[test]
    fn directory_has_seven_universities() {
        assert_eq!(universities().len(), 7);
        assert!(find_university_by_id("uni7").is_some());
    }

    #[test]
    fn lookups_follow_the_hierarchy() {
        assert_eq!(colleges_of(ALGIERS).len(), 3);
        assert!(specializations_of(ALGIERS, SCIENCES).contains(&"الرياضيات"));
        assert!(is_valid_affiliation(ALGIERS, SCIENCES));
        assert!(is_valid_channel_name(ALGIERS, SCIENCES, "الفيزياء"));
        assert!(!is_valid_channel_name(ALGIERS, SCIENCES, "تسويق"));
    }

    #[test]
    fn unknown_entries_yield_empty_results() {
        assert!(colleges_of("nowhere").is_empty());
        assert!(specializations_of(ALGIERS, "nowhere").is_empty());
        assert!(!is_valid_affiliation("nowhere", SCIENCES));
    }
}
