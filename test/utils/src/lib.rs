/// Three persisted messages as returned by `GET /assistant/messages`, deliberately
/// out of order and mixing string and numeric ids.
pub fn history_fixture() -> &'static str {
    return r#"
[
  {
    "id": "m-2",
    "thread_id": "thread_abc",
    "sender_type": "assistant",
    "content": "스쿼트는 무릎이 발끝을 넘지 않도록 하세요.",
    "created_at": "2024-05-01T09:06:00Z"
  },
  {
    "id": 1,
    "thread_id": "thread_abc",
    "sender_type": "user",
    "content": "스쿼트 자세 알려줘",
    "created_at": "2024-05-01T09:05:00Z"
  },
  {
    "id": "m-3",
    "thread_id": null,
    "sender_type": "user",
    "content": "고마워!",
    "created_at": "2024-05-02T21:30:00+00:00"
  }
]
"#
    .trim();
}

pub fn training_program_fixture() -> &'static str {
    return r#"
{
  "training_cycle_length": 3,
  "cycles": [
    {
      "day_index": 1,
      "exercise_type": "상체",
      "sets": [
        {
          "focus_area": "가슴",
          "exercises": [
            {
              "name": "벤치프레스",
              "sets": 4,
              "reps": 10,
              "unit": "회",
              "weight_type": "kg",
              "weight_value": 60.0,
              "rest": 90
            },
            {
              "name": "푸시업",
              "sets": 3,
              "reps": "12-15",
              "unit": "회",
              "weight_type": null,
              "weight_value": null,
              "rest": 60
            }
          ]
        }
      ]
    },
    {
      "day_index": 2,
      "exercise_type": "하체",
      "sets": [
        {
          "focus_area": "허벅지",
          "exercises": [
            {
              "name": "스쿼트",
              "sets": 5,
              "reps": 5,
              "unit": "회",
              "weight_type": "kg",
              "weight_value": 82.5,
              "rest": 120
            }
          ]
        }
      ]
    }
  ],
  "notes": "충분한 수분을 섭취하세요."
}
"#
    .trim();
}
