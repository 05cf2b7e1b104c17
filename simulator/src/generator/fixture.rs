use crate::workflow::dataset::Roster;
use lmpcore::model::{Gender, Person, PersonType};

/// Dobong-gu Office, the default map center.
pub const DOBONG_LAT: f64 = 37.6688;
pub const DOBONG_LON: f64 = 127.0471;

// (id, name, d_lat, d_lon, address, gender)
const USERS: [(u32, &str, f64, f64, &str, Gender); 10] = [
    (1, "김영희", 0.005, 0.003, "서울 도봉구 도봉동 123", Gender::Female),
    (2, "이철수", -0.008, 0.006, "서울 도봉구 쌍문동 234", Gender::Male),
    (3, "박지영", 0.012, -0.004, "서울 도봉구 방학동 345", Gender::Female),
    (4, "최민수", -0.015, -0.008, "서울 도봉구 창동 456", Gender::Male),
    (5, "정수진", 0.018, 0.010, "서울 강북구 미아동 567", Gender::Female),
    (6, "한동훈", -0.020, 0.012, "서울 강북구 번동 678", Gender::Male),
    (7, "윤서연", 0.025, -0.015, "서울 노원구 상계동 789", Gender::Female),
    (8, "강태오", -0.028, -0.018, "서울 노원구 중계동 890", Gender::Male),
    (9, "임은지", 0.032, 0.020, "서울 성북구 장위동 901", Gender::Female),
    (10, "조현우", -0.035, 0.022, "서울 성북구 석관동 012", Gender::Male),
];

// (id, name, d_lat, d_lon, address, gender, has_vehicle, time slots, years)
#[allow(clippy::type_complexity)]
const ASSISTANTS: [(u32, &str, f64, f64, &str, Gender, bool, &str, u32); 20] = [
    (11, "김지원", 0.003, 0.002, "서울 도봉구 도봉동 111-1", Gender::Female, true, "weekday_am", 5),
    (12, "이민호", -0.004, 0.003, "서울 도봉구 도봉동 111-2", Gender::Male, true, "weekday_pm", 3),
    (13, "박서현", 0.005, -0.002, "서울 도봉구 쌍문동 222-1", Gender::Female, false, "weekend", 2),
    (14, "최우진", -0.006, -0.004, "서울 도봉구 쌍문동 222-2", Gender::Male, true, "weekday_am", 4),
    (15, "정다은", 0.007, 0.005, "서울 도봉구 방학동 333-1", Gender::Female, true, "weekday_pm", 6),
    (16, "한지훈", -0.010, 0.008, "서울 도봉구 방학동 333-2", Gender::Male, false, "weekend", 1),
    (17, "윤채원", 0.012, -0.009, "서울 도봉구 창동 444-1", Gender::Female, true, "weekday_am", 5),
    (18, "강민석", -0.013, -0.010, "서울 도봉구 창동 444-2", Gender::Male, true, "weekday_pm", 4),
    (19, "임소라", 0.015, 0.011, "서울 강북구 미아동 555-1", Gender::Female, false, "weekend", 7),
    (20, "조태호", -0.016, 0.012, "서울 강북구 미아동 555-2", Gender::Male, true, "weekday_am", 3),
    (21, "신예린", 0.020, -0.014, "서울 강북구 번동 666-1", Gender::Female, true, "weekday_pm", 8),
    (22, "배준영", -0.021, -0.015, "서울 강북구 번동 666-2", Gender::Male, false, "weekend", 6),
    (23, "서유진", 0.023, 0.016, "서울 노원구 상계동 777-1", Gender::Female, true, "weekday_am", 5),
    (24, "오현수", -0.024, 0.017, "서울 노원구 상계동 777-2", Gender::Male, true, "weekday_pm", 2),
    (25, "권나영", 0.026, -0.018, "서울 노원구 중계동 888-1", Gender::Female, false, "weekend", 9),
    (26, "송재민", -0.028, -0.020, "서울 노원구 중계동 888-2", Gender::Male, true, "weekday_am", 4),
    (27, "홍수아", 0.030, 0.021, "서울 성북구 장위동 999-1", Gender::Female, true, "weekday_pm", 10),
    (28, "노지훈", -0.032, 0.023, "서울 성북구 장위동 999-2", Gender::Male, false, "weekend", 7),
    (29, "황지원", 0.034, -0.024, "서울 성북구 석관동 000-1", Gender::Female, true, "weekday_am", 3),
    (30, "안태양", -0.036, -0.026, "서울 성북구 석관동 000-2", Gender::Male, true, "weekday_pm", 12),
];

/// Fixed demo roster: 10 users and 20 assistants spread 0-4 km around
/// Dobong-gu Office.
pub fn dobong_roster() -> Roster {
    let users = USERS
        .iter()
        .map(|&(id, name, d_lat, d_lon, address, gender)| {
            Person::new(
                id,
                name,
                PersonType::User,
                DOBONG_LAT + d_lat,
                DOBONG_LON + d_lon,
                address,
            )
            .with_phone(format!("010-1234-{}", 5000 + id))
            .with_gender(gender)
        })
        .collect();

    let assistants = ASSISTANTS
        .iter()
        .map(
            |&(id, name, d_lat, d_lon, address, gender, has_vehicle, slots, years)| {
                Person::new(
                    id,
                    name,
                    PersonType::Assistant,
                    DOBONG_LAT + d_lat,
                    DOBONG_LON + d_lon,
                    address,
                )
                .with_phone(format!("010-2001-{:04}", id - 10))
                .with_gender(gender)
                .with_assistant_profile(has_vehicle, slots, years)
            },
        )
        .collect();

    Roster { users, assistants }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lmpcore::geo::distance_km;

    #[test]
    fn fixture_has_expected_shape() {
        let roster = dobong_roster();
        assert_eq!(roster.users.len(), 10);
        assert_eq!(roster.assistants.len(), 20);
        assert!(roster.validate().is_ok());
        assert_eq!(roster.assistants[0].phone.as_deref(), Some("010-2001-0001"));
        assert_eq!(roster.users[9].phone.as_deref(), Some("010-1234-5010"));
    }

    #[test]
    fn everyone_sits_within_five_km_of_the_office() {
        let roster = dobong_roster();
        for person in roster.users.iter().chain(&roster.assistants) {
            let d = distance_km(DOBONG_LAT, DOBONG_LON, person.latitude, person.longitude);
            assert!(d < 5.0, "{} is {d} km away", person.name);
        }
    }
}
