// 마이크로초를 밀리초로 변환하기 위한 상수
pub const MICROS_PER_MILLI: f64 = 1000.0;

// nearest-rank 백분위수 기준값 (fio 출력과 동일)
pub const PERCENTILE_THRESHOLDS: [f64; 15] = [
    1.0, 5.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 95.0, 99.0, 99.5, 99.9,
];

// 한 줄에 출력할 백분위수 개수
pub const NUM_PERCENTILE_PER_LINE: usize = 3;

// --infer 사용 시 기본 레이턴시 임계값 (100ms)
pub const DEFAULT_INFER_THRESHOLD_US: u64 = 100_000;

// 기여도가 100%를 넘을 때 대신 기록하는 값
pub const CONTRIBUTION_CAP: f64 = 99.99;

// radostrace 기본 레이턴시 임계값 (100ms)
pub const DEFAULT_RADOSTRACE_THRESHOLD_US: u64 = 100_000;
