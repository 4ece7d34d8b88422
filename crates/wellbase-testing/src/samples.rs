//! Sample file contents.

pub const PRODUCTION_CSV: &str = "\
well,month,oil,gas,water
W1,Jan,120.5,3400,12
W1,Feb,118.25,3350,14
";

pub const TEST_CSV: &str = "\
well,month,rate,pressure
W1,Mar,80,2100.5
";

pub const DRILLING_CSV: &str = "\
well,month,depth,rop
W1,Apr,1250,14.2
W1,May,1310.5,n/a
";

pub const RESERVES_CSV: &str = "\
name,p1,p2,field
W1,1200,3400,Heletz
W2,800,1500,Brur
";

pub const SEISMIC_CSV: &str = "\
seismic_survey,status
Heletz3D,completed
Sifra3D,planned
";

pub const SAFETY_CSV: &str = "\
well,days_without_incidents
w1,215
W2,37
";

pub const POLYGON_CSV: &str = "\
x,y
34.5,31.6
34.6,31.7
";

pub const SAMPLE_LAS: &str = "\
~VERSION INFORMATION
 VERS.                 2.0 :   CWLS LOG ASCII STANDARD -VERSION 2.0
 WRAP.                  NO :   ONE LINE PER DEPTH STEP
~WELL INFORMATION
 NULL.           -999.25              : NULL VALUE
 WELL.           W1                   : WELL
~CURVE INFORMATION
 DEPT.M                               : DEPTH
 GR  .GAPI                            : GAMMA RAY
~A
1500.0  45.1
1500.5  47.9
1501.0  -999.25
";
